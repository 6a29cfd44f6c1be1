//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the data shapes stay free of
//! presentation concerns. Output is markdown with status icons, suitable for
//! terminal rendering.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{LearnerStats, Roadmap, RoadmapStatus, RoadmapSummary, Step, StepStatus};

impl fmt::Display for RoadmapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Roadmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Goal: {}", self.goal)?;
        writeln!(f, "- Status: {}", self.status.as_str())?;
        if let Some(subject) = &self.subject {
            writeln!(f, "- Subject: {subject}")?;
        }
        writeln!(
            f,
            "- Progress: {}/{} steps ({:.0}%)",
            self.completed_steps,
            self.total_steps,
            self.completion_ratio() * 100.0
        )?;
        writeln!(
            f,
            "- Time: {} min spent of {} min estimated",
            self.actual_minutes_spent, self.estimated_minutes
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Last activity: {}", LocalDateTime(&self.last_activity_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }

        if let Some(overview) = &self.overview {
            writeln!(f)?;
            writeln!(f, "{overview}")?;
        }

        if !self.pitfalls.is_empty() {
            writeln!(f, "\n## Pitfalls")?;
            writeln!(f)?;
            for pitfall in &self.pitfalls {
                writeln!(f, "- {pitfall}")?;
            }
        }

        if !self.steps.is_empty() {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        } else {
            writeln!(f, "\nNo steps in this roadmap.")?;
        }

        Ok(())
    }
}

impl Step {
    /// Format the step using the compact display format, the same whether
    /// shown standalone or within a roadmap.
    fn fmt_step(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.order,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        if let Some(timeframe) = &self.timeframe {
            writeln!(f, "- Timeframe: {timeframe}")?;
        }
        writeln!(f, "- Estimated: {} min", self.duration_minutes)?;
        if self.minutes_spent > 0 {
            writeln!(f, "- Spent: {} min", self.minutes_spent)?;
        }

        if let Some(done_when) = &self.done_when {
            writeln!(f, "\n#### Done when")?;
            writeln!(f)?;
            writeln!(f, "{done_when}")?;
        }

        // Show notes only for completed steps
        if self.status == StepStatus::Completed {
            if let Some(notes) = &self.user_notes {
                writeln!(f, "\n#### Notes")?;
                writeln!(f)?;
                writeln!(f, "{notes}")?;
            }
        }

        if !self.resources.is_empty() {
            writeln!(f, "\n#### Resources")?;
            writeln!(f)?;
            for resource in &self.resources {
                writeln!(f, "- {resource}")?;
            }
        }

        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_step(f)
    }
}

impl fmt::Display for RoadmapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active_marker = if self.is_active { " [active]" } else { "" };

        writeln!(
            f,
            "## {} (ID: {}){} ({}/{})",
            self.title, self.id, active_marker, self.completed_steps, self.total_steps
        )?;
        writeln!(f)?;

        writeln!(f, "- **Goal**: {}", self.goal)?;
        writeln!(f, "- **Status**: {}", self.status.as_str())?;
        if let Some(subject) = &self.subject {
            writeln!(f, "- **Subject**: {subject}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for LearnerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Learner Statistics")?;
        writeln!(f)?;
        writeln!(f, "- Roadmaps: {}", self.total_roadmaps)?;
        writeln!(f, "- Completed: {}", self.completed_roadmaps)?;
        writeln!(f, "- Total time: {} min", self.total_minutes_spent)?;
        writeln!(
            f,
            "- Average completion: {:.0}%",
            self.average_completion * 100.0
        )?;

        if let Some(active) = &self.active_roadmap {
            writeln!(f, "\n## Active Roadmap")?;
            writeln!(f)?;
            write!(f, "{active}")?;
        }

        Ok(())
    }
}
