//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Each project leads with its grid position and name; directories and
//! files follow as indented context lines. Replay steps lead with the script
//! line and command, followed by one line per effect, so a run reads as a
//! transcript of what the page was asked to do.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Projects
//! 001 Villa Ikoyi (3 photos)
//!     Source: 010-Villa-Ikoyi/
//!     Caption: Residential — Lagos
//!     001 001-facade.jpg
//!     002 002-atrium.jpg
//!     003 010-terrace.webp
//! 003 Empty Lot (no photos, inert)
//!     Source: 030-Empty-Lot/
//!
//! Hidden
//!     drafts (1 photos)
//!
//! Config
//!     config.toml
//!     base_path: media
//! ```
//!
//! ## Replay
//!
//! ```text
//!   2 next
//!     show media/010-Villa-Ikoyi/002-atrium.jpg "Villa Ikoyi — Project photo 2" (fade 250ms)
//!     indicator 2
//!   3 jump 2
//!     (no-op)
//!
//! Final: open, photo 2/3, scroll suspended
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::GenerateSummary;
use crate::lightbox::{Effect, Tween};
use crate::replay::{CardStatus, CheckReport, Replay, StepOutcome};
use crate::scan::{Manifest, Project};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `001 Villa Ikoyi (3 photos)`, or the inert marker for empty projects.
fn project_header(index: usize, project: &Project) -> String {
    if project.is_inert() {
        format!("{} {} (no photos, inert)", format_index(index), project.name)
    } else {
        format!(
            "{} {} ({} photos)",
            format_index(index),
            project.name,
            project.images.len()
        )
    }
}

fn tween(t: &Tween) -> String {
    format!("{}ms", t.duration_ms)
}

/// One line per effect.
fn effect_line(effect: &Effect) -> String {
    match effect {
        Effect::SetTitle { text } => format!("title \"{text}\""),
        Effect::SetCaption { text } => format!("caption \"{text}\""),
        Effect::ShowImage { src, alt, fade } => {
            format!("show {src} \"{alt}\" (fade {})", tween(fade))
        }
        Effect::RenderIndicators { count, active } => {
            format!("indicators {count}, active {}", active + 1)
        }
        Effect::ActivateIndicator { index } => format!("indicator {}", index + 1),
        Effect::SetNavigationVisible { visible: true } => "navigation shown".to_string(),
        Effect::SetNavigationVisible { visible: false } => "navigation hidden".to_string(),
        Effect::SuspendScroll => "scroll suspended".to_string(),
        Effect::PlayEntrance { tween: t } => format!("entrance {} {}", tween(t), t.ease),
        Effect::PlayExit { tween: t, ticket } => {
            format!("exit {} {} (ticket {})", tween(t), t.ease, ticket.id())
        }
        Effect::Conceal => "conceal".to_string(),
        Effect::ResumeScroll => "scroll resumed".to_string(),
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Projects".to_string()];

    for (i, project) in manifest.grid().enumerate() {
        lines.push(project_header(i + 1, project));
        lines.push(format!("{}Source: {}/", indent(1), project.dir));
        let caption = project.caption();
        if !caption.is_empty() {
            lines.push(format!("{}Caption: {}", indent(1), caption));
        }
        for (n, entry) in project.images.iter().enumerate() {
            let file = entry.rsplit('/').next().unwrap_or(entry);
            lines.push(format!("{}{} {}", indent(1), format_index(n + 1), file));
        }
    }

    let hidden: Vec<&Project> = manifest.projects.iter().filter(|p| !p.in_grid).collect();
    if !hidden.is_empty() {
        lines.push(String::new());
        lines.push("Hidden".to_string());
        for project in hidden {
            lines.push(format!(
                "{}{} ({} photos)",
                indent(1),
                project.dir,
                project.images.len()
            ));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    lines.push(format!("{}base_path: {}", indent(1), manifest.config.base_path));

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(summary: &GenerateSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Home → {}", output_dir.join("index.html").display())];
    let live = summary.cards - summary.inert_cards;
    if summary.inert_cards > 0 {
        lines.push(format!(
            "{}{} cards ({} inert)",
            indent(1),
            summary.cards,
            summary.inert_cards
        ));
    } else {
        lines.push(format!("{}{} cards", indent(1), summary.cards));
    }
    match &summary.image_dir {
        Some(dir) => lines.push(format!(
            "{}{} photos → {}",
            indent(1),
            summary.images_copied,
            dir.display()
        )),
        None => lines.push(format!("{}photos served from remote base path", indent(1))),
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated 1 page, {} openable galleries, {} photos",
        live, summary.images_copied
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary, output_dir: &Path) {
    for line in format_generate_output(summary, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![format!("Modal markup: ok (#{})", report.root)];
    for (i, card) in report.cards.iter().enumerate() {
        let status = match &card.status {
            CardStatus::Opens { images } => format!("opens {images} photos"),
            CardStatus::Inert { reason } => format!("inert ({reason})"),
        };
        lines.push(format!("{} {}: {}", format_index(i + 1), card.name, status));
    }
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

pub fn format_replay_step(step: &StepOutcome) -> Vec<String> {
    let mut lines = vec![format!("{:>3} {}", step.line, step.text)];
    if step.effects.is_empty() {
        lines.push(format!("{}(no-op)", indent(1)));
    }
    for effect in &step.effects {
        lines.push(format!("{}{}", indent(1), effect_line(effect)));
    }
    lines
}

/// Closing summary: where the modal ended up.
pub fn format_replay_summary(replay: &Replay) -> String {
    let view = &replay.view;
    let scroll = if replay.scroll.suspended {
        "scroll suspended"
    } else {
        "scroll free"
    };
    if !view.visible {
        return format!("Final: closed, {scroll}");
    }
    let state = if view.is_exiting() { "closing" } else { "open" };
    match view.active_indicator() {
        Some(active) => format!(
            "Final: {state}, photo {}/{}, {scroll}",
            active + 1,
            view.indicators.len()
        ),
        None => format!("Final: {state}, {scroll}"),
    }
}

pub fn print_replay_output(replay: &Replay) {
    for step in &replay.steps {
        for line in format_replay_step(step) {
            println!("{}", line);
        }
    }
    println!();
    println!("{}", format_replay_summary(replay));
}

// ============================================================================
// Tests
// ============================================================================
