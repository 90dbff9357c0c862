//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::chart::Difficulty;
use crate::play::{JudgmentTier, ResultSummary, TierCounts};
use crate::score::{FeedbackTier, LeaderboardEntry, RankedResult};

const BORDER_WIDTH: usize = 50;
const BOARD_NAME_CHARS: usize = 14;

/// Format a ranked submission as a boxed multi-line summary
pub fn format_ranked_result(ranked: &RankedResult) -> String {
    let mut output = String::new();
    let border = "━".repeat(BORDER_WIDTH);
    let entry = &ranked.entry;

    let _ = writeln!(output, "{}", border.dimmed());
    let _ = writeln!(output, "  {}", entry.name.bold());
    let _ = writeln!(output, "{}", border.dimmed());
    let _ = writeln!(output, "  SCORE  : {}", entry.score);
    let _ = writeln!(output, "  ACC    : {:.0}%", entry.accuracy * 100.0);
    let _ = writeln!(output, "  COMBO  : {}", entry.max_combo);
    let rank = format!("#{}", ranked.rank);
    let _ = writeln!(
        output,
        "  RANK   : {} of {}{}",
        rank.bold(),
        ranked.total,
        if ranked.retained { "" } else { " (not in top list)" }
    );
    let _ = writeln!(output, "  BETTER : {}% of players", ranked.percentile);
    let _ = writeln!(output, "  {}", format_colored_feedback(ranked.feedback));
    let _ = write!(output, "{}", border.dimmed());

    output
}

/// Format per-session totals, shown before submission
pub fn format_result_summary(summary: &ResultSummary) -> String {
    format!(
        "{} [{}] {} score {} acc {:.2}% max combo {} ({})",
        summary.song_id,
        summary.difficulty,
        summary.player_name,
        summary.score,
        summary.accuracy * 100.0,
        summary.max_combo,
        format_counts(&summary.counts)
    )
}

/// `P/G/B/M` judgment counts with tier colors
pub fn format_counts(counts: &TierCounts) -> String {
    format!(
        "{}/{}/{}/{}",
        counts.perfect.cyan(),
        counts.good.green(),
        counts.bad.yellow(),
        counts.miss.red()
    )
}

/// Format a stored leaderboard as a ranked table
pub fn format_leaderboard(entries: &[LeaderboardEntry], difficulty: Difficulty) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Leaderboard ({})", difficulty.display_name().bold());

    if entries.is_empty() {
        let _ = write!(output, "  {}", "No scores yet".dimmed());
        return output;
    }

    let lines: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let name: String = e.name.chars().take(BOARD_NAME_CHARS).collect();
            format!(
                "  {:>2}. {:<14} {:>8}  {:>3.0}%",
                i + 1,
                name,
                e.score,
                e.accuracy * 100.0
            )
        })
        .collect();
    output.push_str(&lines.join("\n"));

    output
}

/// Colored judgment label for live feedback
pub fn format_colored_tier(tier: JudgmentTier) -> String {
    let name = tier.short_name();
    match tier {
        JudgmentTier::Perfect => name.cyan().bold().to_string(),
        JudgmentTier::Good => name.green().to_string(),
        JudgmentTier::Bad => name.yellow().to_string(),
        JudgmentTier::Miss => name.red().to_string(),
    }
}

fn format_colored_feedback(feedback: FeedbackTier) -> String {
    let message = feedback.message();
    match feedback {
        FeedbackTier::Elite => message.truecolor(255, 200, 0).bold().to_string(),
        FeedbackTier::NearElite => message.cyan().to_string(),
        FeedbackTier::AboveAverage => message.green().to_string(),
        FeedbackTier::Average => message.to_string(),
        FeedbackTier::Poor => message.red().to_string(),
    }
}
