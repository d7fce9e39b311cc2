//! Chat platform interaction payloads
//!
//! Only the fields the bridge reads are modelled; everything else in the
//! payload is ignored.

mod command;
mod model;

pub use command::{Command, CommandParseError};
pub use model::{
    CommandData, CommandOption, GuildMember, Interaction, InteractionResponse, InteractionType,
    ResponseData, User, EPHEMERAL_FLAG,
};
