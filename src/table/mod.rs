pub mod bet;
pub use bet::*;

pub mod config;
pub use config::*;

pub mod instructions;
pub use instructions::*;

pub mod kind;
pub use kind::*;

pub mod odds;
pub use odds::*;

pub mod puck;
pub use puck::*;

pub mod ratio;
pub use ratio::*;

pub mod signature;
pub use signature::*;

pub mod table;
pub use table::*;
