//! Connection registration handlers (NICK, USER, PING, PONG).

mod nick;
mod ping;
mod user;
mod welcome;

pub use nick::NickHandler;
pub use ping::{PingHandler, PongHandler};
pub use user::UserHandler;
pub use welcome::send_welcome;
