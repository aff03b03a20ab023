pub mod game_flow;
pub mod registry;
pub mod timers;
