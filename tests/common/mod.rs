//! Shared fixture: a small block-structured scenario language
//!
//! ```text
//! include <file-path>
//! switch (on | off)
//! route ... end_route
//!     position <position>
//!     speed <real>
//! platform <name> <platform-type> ... end_platform
//!     side <side>
//!     edit sensor <.sensors>
//!     position <position>
//!     <commands of the platform type>
//! ```
#![allow(dead_code)]

use syntax_assist::completion::{AutoComplete, CompletionRequest};
use syntax_assist::config::EngineConfig;
use syntax_assist::grammar::{Grammar, GrammarBuilder, RuleId};
use syntax_assist::types::{type_path, DefinitionIndex, TypeId, TypeTable};

pub struct Scenario {
    pub grammar: Grammar,
    pub types: TypeTable,
    pub index: DefinitionIndex,
    pub config: EngineConfig,
    pub document: RuleId,
    pub platform_block: RuleId,
    pub route_block: RuleId,
    /// User platform type `fighter`, derived from `WSF_PLATFORM`.
    pub fighter: TypeId,
}

impl Scenario {
    pub fn new() -> Self {
        let mut b = GrammarBuilder::new();

        let x = b.real();
        let y = b.real();
        let position_value = b.single_token_sequence("position", vec![x, y]);

        // platform body
        let side_kw = b.literal("side");
        let side_name = b.name_reference("side");
        let side = b.sequence(vec![side_kw, side_name]);
        let edit_kw = b.literal("edit");
        let sensor_kw = b.literal("sensor");
        let sensor_name = b.type_reference(".sensors");
        let edit_sensor = b.sequence(vec![edit_kw, sensor_kw, sensor_name]);
        let position_kw = b.literal("position");
        let position = b.sequence(vec![position_kw, position_value]);
        let type_commands = b.type_command();
        let platform_commands = b.alternate(vec![side, edit_sensor, position, type_commands]);
        let platform_block = b.recurrence(Some(platform_commands), "end_platform");

        let platform_kw = b.literal("platform");
        let platform_name = b.string("name");
        let platform_type = b.string("platform-type");
        let load_type = b.load_from_word(type_path(&["platformType"]), 2);
        let platform_end = b.literal("end_platform");
        let platform = b.sequence(vec![
            platform_kw,
            platform_name,
            platform_type,
            load_type,
            platform_block,
            platform_end,
        ]);

        // route body
        let route_position_kw = b.literal("position");
        let route_position = b.sequence(vec![route_position_kw, position_value]);
        let speed_kw = b.literal("speed");
        let speed_value = b.real();
        let speed = b.sequence(vec![speed_kw, speed_value]);
        let route_commands = b.alternate(vec![route_position, speed]);
        let route_block = b.recurrence(Some(route_commands), "end_route");
        let route_kw = b.literal("route");
        let route_end = b.literal("end_route");
        let route = b.sequence(vec![route_kw, route_block, route_end]);

        let switch_kw = b.literal("switch");
        let on = b.literal("on");
        let off = b.literal("off");
        let on_off = b.alternate(vec![on, off]);
        let switch = b.sequence(vec![switch_kw, on_off]);

        let include_kw = b.literal("include");
        let include_file = b.file_path(None);
        let include = b.sequence(vec![include_kw, include_file]);

        let top_commands = b.alternate(vec![include, switch, route, platform]);
        let document = b.recurrence(Some(top_commands), "");

        // commands only fighters understand
        let afterburner_kw = b.literal("afterburner");
        let afterburner_on = b.literal("on");
        let afterburner_off = b.literal("off");
        let afterburner_state = b.alternate(vec![afterburner_on, afterburner_off]);
        let afterburner = b.sequence(vec![afterburner_kw, afterburner_state]);

        let grammar = b.finish(document).expect("fixture grammar is valid");

        let mut types = TypeTable::new();
        let basic = types.basic_root();
        let base = types.declare(basic, "platformType", "WSF_PLATFORM", None);
        types.declare(base, "sensors", "RADAR_1", None);
        let user = types.user_root();
        let fighter = types.declare(user, "platformType", "fighter", Some(base));
        types.declare(fighter, "sensors", "IRST", None);
        types.set_rule(fighter, afterburner);

        let mut index = DefinitionIndex::new();
        index.add_definition(type_path(&["platformType", "fighter"]), "fighter");
        index.add_base_type(type_path(&["platformType"]), "WSF_PLATFORM");
        index.add_name("side", "red");
        index.add_name("side", "blue");

        Self {
            grammar,
            types,
            index,
            config: EngineConfig::default(),
            document,
            platform_block,
            route_block,
            fighter,
        }
    }

    pub fn engine(&self) -> AutoComplete<'_> {
        AutoComplete::new(&self.grammar, &self.types, &self.index, self.config.clone())
    }

    /// Request typed inside a `platform ... end_platform` block of a fighter.
    pub fn in_fighter(&self, text: &str) -> CompletionRequest {
        CompletionRequest::at_end(text)
            .in_blocks(vec![self.platform_block, self.document])
            .with_type(Some(self.fighter))
    }
}

pub fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
