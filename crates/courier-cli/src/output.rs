//! Output formatting for dispatch traces, distance tables and routes.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use courier_lib::{
    DeliveryTier, DispatchQueue, DispatchSummary, DistanceSummary, LocationCatalog, LocationId,
    PathSummary, RenderMode,
};

use crate::terminal::{colors, format_with_separators, supports_color, supports_unicode, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text with colors when the terminal supports them.
    #[default]
    Text,
    /// Markdown-flavoured text for pasting into notes or chat.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}

/// Print the CLI banner to stderr so stdout stays machine-readable.
pub fn print_logo() {
    let palette = if supports_color() {
        (colors::ORANGE, colors::CYAN, colors::RESET)
    } else {
        ("", "", "")
    };
    eprintln!("{}", format_logo(supports_unicode(), palette));
}

fn format_logo(unicode: bool, (orange, cyan, reset): (&str, &str, &str)) -> String {
    if unicode {
        format!(
            "{cyan}╭──────────────────────────────────╮{reset}
{cyan}│{orange}   C O U R I E R   D I S P A T C H{cyan}│{reset}
{cyan}╰──────────────────────────────────╯{reset}"
        )
    } else {
        format!(
            "{orange}+----------------------------------+
|  COURIER DISPATCH                |
+----------------------------------+{reset}"
        )
    }
}

/// Write any serialisable value as pretty JSON followed by a newline.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn tier_badge(palette: &ColorPalette, tier: DeliveryTier) -> String {
    let (color, label) = match tier {
        DeliveryTier::Expedited => (palette.tag_expedited, "FAST"),
        DeliveryTier::Standard => (palette.tag_standard, "NORM"),
    };
    format!("{color}[{label}]{}", palette.reset)
}

fn distance_text(palette: &ColorPalette, distance: Option<u64>) -> String {
    match distance {
        Some(units) => format!(
            "{}{} units{}",
            palette.green,
            format_with_separators(units),
            palette.reset
        ),
        None => format!("{}no path found{}", palette.red, palette.reset),
    }
}

/// Colored text rendering of a dispatch trace.
pub fn format_dispatch_text(summary: &DispatchSummary, palette: &ColorPalette) -> String {
    let name = |code: &courier_lib::LocationRef| match &code.label {
        Some(label) => format!("{}{}{} ({label})", palette.white_bold, code.code, palette.reset),
        None => format!("{}{}{}", palette.white_bold, code.code, palette.reset),
    };

    let mut lines = vec![format!(
        "Dispatch from {} ({} deliveries):",
        name(&summary.start),
        summary.deliveries
    )];
    for leg in &summary.legs {
        lines.push(format!(
            "{:>3}. {} {} {}->{} {}: {}",
            leg.sequence,
            tier_badge(palette, leg.tier),
            leg.order,
            palette.gray,
            palette.reset,
            name(&leg.to),
            distance_text(palette, leg.distance)
        ));
        if let Some(path) = &leg.path {
            let joined = path
                .iter()
                .map(|step| step.code.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            lines.push(format!("     {}via {joined}{}", palette.gray, palette.reset));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "Total distance: {}",
        distance_text(palette, Some(summary.total_distance))
    ));
    if summary.unreachable > 0 {
        lines.push(format!(
            "{}Unreachable deliveries: {}{}",
            palette.red, summary.unreachable, palette.reset
        ));
    }
    lines.push(format!("Courier finishes at {}", name(&summary.finish)));
    lines.join("\n") + "\n"
}

/// Render a dispatch summary in the selected format.
pub fn render_dispatch(summary: &DispatchSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(summary),
        OutputFormat::Rich => {
            print!("{}", summary.render(RenderMode::RichText));
            Ok(())
        }
        OutputFormat::Text => {
            print!("{}", format_dispatch_text(summary, &ColorPalette::detect()));
            Ok(())
        }
    }
}

pub fn render_distances(summary: &DistanceSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(summary),
        OutputFormat::Rich => {
            print!("{}", summary.render(RenderMode::RichText));
            Ok(())
        }
        OutputFormat::Text => {
            print!("{}", summary.render(RenderMode::PlainText));
            Ok(())
        }
    }
}

pub fn render_path(summary: &PathSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(summary),
        OutputFormat::Rich => {
            print!("{}", summary.render(RenderMode::RichText));
            Ok(())
        }
        OutputFormat::Text => {
            print!("{}", summary.render(RenderMode::PlainText));
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct LocationRow<'a> {
    code: &'a str,
    label: &'a str,
}

pub fn render_locations(catalog: &LocationCatalog, format: OutputFormat) -> io::Result<()> {
    if format.is_json() {
        let rows: Vec<_> = catalog
            .iter()
            .map(|(code, label)| LocationRow {
                code: code.as_str(),
                label,
            })
            .collect();
        return render_json(&rows);
    }

    println!("Locations:");
    for (code, label) in catalog.iter() {
        println!("{code}: {label}");
    }
    Ok(())
}

/// Text listing of today's available locations with their labels.
pub fn format_available<'a, I>(catalog: &LocationCatalog, available: I) -> String
where
    I: IntoIterator<Item = &'a LocationId>,
{
    let mut text = String::from("Available locations for today:\n");
    for code in available {
        let label = catalog.label(code.as_str()).unwrap_or_default();
        text.push_str(&format!("{code}: {label}\n"));
    }
    text
}

/// Text listing of the queued orders per tier, before dispatch.
pub fn format_queue(queue: &DispatchQueue) -> String {
    if queue.is_empty() {
        return "Queue is empty\n".to_string();
    }

    let list = |tier: DeliveryTier| {
        queue
            .show(tier)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Fast delivery orders in queue: [{}]\nNormal delivery orders in queue: [{}]\n",
        list(DeliveryTier::Expedited),
        list(DeliveryTier::Standard)
    )
}
