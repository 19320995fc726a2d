//! Everything the CLI prints for one analyzed conversation.

use prettytable::{Table, row};
use serde::Serialize;
use std::fmt::Write;

use crate::analysis::AnalysisResult;
use crate::responses::{MoveTree, ResponseVariant, build_move_tree, generate_responses};
use crate::transcript::Message;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub analysis: AnalysisResult,
    pub responses: Vec<ResponseVariant>,
    /// Tree for the first (recommended) response
    pub move_tree: Option<MoveTree>,
}

impl Report {
    pub fn build(analysis: AnalysisResult, messages: &[Message]) -> Self {
        let responses = generate_responses(&analysis, messages);
        let move_tree = responses
            .first()
            .map(|v| build_move_tree(v, analysis.primary_context()));
        Self {
            analysis,
            responses,
            move_tree,
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text rendering with one table per section
    pub fn to_text(&self) -> String {
        let a = &self.analysis;
        let mut out = String::new();

        let mut summary = Table::new();
        summary.add_row(row![
            "Context",
            format!("{} ({}%)", a.context_label, a.context.confidence)
        ]);
        summary.add_row(row!["Objective", a.objective.label()]);
        summary.add_row(row!["Stakes", a.stakes]);
        summary.add_row(row!["Power balance", a.power_balance]);
        summary.add_row(row!["Win probability", format!("{}%", a.win_probability)]);
        summary.add_row(row![
            "Messages",
            format!(
                "you {} / {} {}",
                a.message_count.you, a.counterpart_name, a.message_count.them
            )
        ]);
        summary.add_row(row![
            "Avg response",
            format!(
                "you {}m / them {}m",
                a.avg_response.you_minutes, a.avg_response.them_minutes
            )
        ]);
        summary.add_row(row!["Initiator", a.initiator]);
        let _ = writeln!(out, "SUMMARY\n{}", summary);

        let mut signals = Table::new();
        signals.add_row(row!["Kind", "Signal", "Tier", "Excerpt"]);
        for s in &a.green_lights {
            signals.add_row(row!["green", s.label, s.tier, s.excerpt]);
        }
        for s in &a.red_flags {
            signals.add_row(row!["red", s.label, s.tier, s.excerpt]);
        }
        let _ = writeln!(out, "SIGNALS\n{}", signals);

        let mut moments = Table::new();
        moments.add_row(row!["Turn", "Moment", "Impact", "Excerpt"]);
        for m in &a.critical_moments {
            moments.add_row(row![m.turn, m.label, format!("{:+}", m.impact), m.excerpt]);
        }
        let _ = writeln!(out, "CRITICAL MOMENTS\n{}", moments);

        let p = &a.behavioral_profile;
        let mut profile = Table::new();
        profile.add_row(row!["Style", p.communication_style]);
        profile.add_row(row!["Decision speed", p.decision_speed]);
        profile.add_row(row!["Investment", p.investment_level.label()]);
        profile.add_row(row!["Consistency", p.consistency_score]);
        profile.add_row(row!["Pattern", p.response_pattern]);
        profile.add_row(row!["Attachment", p.attachment_style]);
        profile.add_row(row!["Priorities", p.hidden_priorities.join(", ")]);
        let _ = writeln!(out, "COUNTERPART PROFILE\n{}", profile);

        let _ = writeln!(
            out,
            "YOUR STYLE: {} ({})\n{}\n",
            a.self_profile.title, a.self_profile.style, a.self_profile.description
        );

        let t = &a.timing;
        let mut timing = Table::new();
        timing.add_row(row!["Best days", t.best_days.join(", ")]);
        timing.add_row(row!["Best hours", t.best_hours]);
        timing.add_row(row!["Avoid", t.avoid_timing]);
        timing.add_row(row!["Reply delay", t.response_delay]);
        let _ = writeln!(out, "TIMING\n{}", timing);

        let mut wins = Table::new();
        wins.add_row(row!["Urgency", "Action", "Why"]);
        for w in &a.quick_wins {
            wins.add_row(row![w.urgency, w.action, w.why]);
        }
        let _ = writeln!(out, "QUICK WINS\n{}", wins);

        let mut replies = Table::new();
        replies.add_row(row!["#", "Type", "Risk", "Impact", "Message"]);
        for (i, v) in self.responses.iter().enumerate() {
            replies.add_row(row![i + 1, v.kind, v.risk, v.impact, v.message]);
        }
        let _ = writeln!(out, "REPLIES\n{}", replies);

        if let Some(tree) = &self.move_tree {
            let mut branches = Table::new();
            branches.add_row(row!["Branch", "Chance", "They", "You"]);
            for (name, b) in tree.branches() {
                branches.add_row(row![
                    name,
                    format!("{}%", b.probability),
                    b.response,
                    b.your_move
                ]);
            }
            let _ = writeln!(out, "MOVE TREE ({})\n{}", tree.variant, branches);
        }

        out
    }
}
