//! Eval command - evaluates a math expression.

use crate::commands::CommandHandler;
use crate::context::CommandContext;
use crate::error::{AppResult, EvalError};
use crate::reply::float_text;
use async_trait::async_trait;
use discord_client::SentMessage;
use meval::Expr;

pub struct EvalCommand;

impl EvalCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EvalCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse then evaluate `code`, keeping the two failure kinds apart.
pub fn evaluate(code: &str) -> Result<f64, EvalError> {
    let expr: Expr = code.parse().map_err(EvalError::Evaluation)?;
    expr.eval().map_err(EvalError::Runtime)
}

#[async_trait]
impl CommandHandler for EvalCommand {
    fn name(&self) -> &str {
        "eval"
    }

    fn description(&self) -> &str {
        "Evaluate a math expression"
    }

    fn usage(&self) -> &str {
        "<code>"
    }

    fn category(&self) -> &str {
        "debug"
    }

    async fn exec(&self, ctx: &CommandContext) -> AppResult<SentMessage> {
        let code = ctx.args.join(" ");

        let reply = match evaluate(&code) {
            Ok(value) => format!("Result: \n```\n{}\n```", float_text(value)),
            Err(e) => e.to_string(),
        };

        Ok(ctx.reply(reply).await?)
    }
}
