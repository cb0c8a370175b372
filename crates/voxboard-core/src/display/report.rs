//! Execution report rendering.

use std::fmt;

use crate::models::{ActionReport, ExecutionReport, Outcome};

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::Skipped { reason } => write!(f, "skipped ({reason})"),
            Self::Failed { error } => write!(f, "failed ({error})"),
        }
    }
}

impl fmt::Display for ActionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. **{}**", self.index + 1, self.kind)?;
        if let Some(subject) = &self.subject {
            write!(f, " {subject}")?;
        }
        writeln!(f, ": {}", self.outcome)?;
        for effect in &self.effects {
            writeln!(f, "    - {}: {}", effect.effect, effect.outcome)?;
        }
        Ok(())
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**Transcript:** {}", self.transcript)?;
        writeln!(f)?;
        writeln!(
            f,
            "**Summary:** {} applied, {} skipped, {} failed",
            self.applied(),
            self.skipped(),
            self.failed()
        )?;
        writeln!(f)?;
        for action in &self.actions {
            write!(f, "{action}")?;
        }
        Ok(())
    }
}
