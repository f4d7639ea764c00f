pub mod game;
pub mod machine;
pub mod purchase;
pub mod user;
pub mod validate;
