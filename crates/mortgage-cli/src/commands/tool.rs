use clap::Args;

use uae_mortgage_core::tools::{dispatch, ToolRequest};
use uae_mortgage_core::LendingPolicy;

use crate::input;

/// Arguments for dispatching a capability request the way a tool-calling
/// agent would: a tagged JSON object selects the operation and carries its
/// typed parameters; the reply is the chat-ready text.
#[derive(Args)]
pub struct ToolArgs {
    /// Path to a JSON tool request (e.g. {"tool": "calculate_mortgage", "params": {...}})
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_tool(args: ToolArgs) -> Result<String, Box<dyn std::error::Error>> {
    let request: ToolRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for a tool request".into());
    };

    let policy = LendingPolicy::default();
    Ok(dispatch(&policy, &request)?)
}
