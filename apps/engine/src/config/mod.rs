pub mod game;
pub mod images;

pub use game::GameConfig;
pub use images::ImageServiceConfig;
