//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `add_user`: Register a user
//! - `add_train`: Add a train to the inventory
//! - `trains`: Search trains by route
//! - `reserve`: Reserve seats on a train
//! - `booking`: Show a booking
//! - `verify`: Check integrity and seat accounting
//! - `completions`: Generate shell completion scripts

pub mod add_train;
pub mod add_user;
pub mod booking;
pub mod completions;
pub mod init;
pub mod reserve;
pub mod trains;
pub mod verify;

pub use add_train::AddTrainCommand;
pub use add_user::AddUserCommand;
pub use booking::BookingCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use reserve::ReserveCommand;
pub use trains::TrainsCommand;
pub use verify::VerifyCommand;
