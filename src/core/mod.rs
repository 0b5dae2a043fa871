pub mod client;
pub mod messages;
pub mod options;
pub mod transport;

pub use client::AgentClient;
pub use messages::{ContentBlock, ResultMessage, SdkMessage, UserContent};
pub use options::{AgentDefinition, PermissionMode, QueryOptions};
pub use transport::{MessageStream, SubprocessTransport, Transport};
