//! Breakdown rendering.
//!
//! Renderers turn a finished ValuationReport into text. They never
//! compute anything: every number printed comes from a record.

use crate::report::{
    Adjustment, BaseValueRecord, Bucket, ComboSelection, ItemKind, ItemValuation,
    MultiplierRecord, ResourceRecord, SpecialAward, SpecialBonusRecord, ValuationReport,
};
use std::fmt::Write as _;

pub trait BreakdownRenderer {
    fn render(&self, report: &ValuationReport) -> String;
}

/// HTML fragment: one `step` div per stage, then subtotal and final blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

/// Plain text with the same sections as the HTML layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Step,
    Subtotal,
    Final,
}

struct Section {
    kind:  SectionKind,
    title: String,
    lines: Vec<String>,
}

impl BreakdownRenderer for HtmlRenderer {
    fn render(&self, report: &ValuationReport) -> String {
        let mut out = String::new();
        for section in sections(report) {
            match section.kind {
                SectionKind::Step => {
                    let _ = write!(out, "<div class='step'><h3>{}</h3><pre>", escape(&section.title));
                    for line in &section.lines {
                        let _ = writeln!(out, "{}", escape(line));
                    }
                    out.push_str("</pre></div>");
                }
                SectionKind::Subtotal => {
                    out.push_str("<div class='subtotal'>");
                    for line in &section.lines {
                        let _ = write!(out, "<p>{}</p>", escape(line));
                    }
                    out.push_str("</div>");
                }
                SectionKind::Final => {
                    let _ = write!(out, "<div class='final-total'><h3>{}</h3>", escape(&section.title));
                    let (last, rest) = match section.lines.split_last() {
                        Some((last, rest)) => (Some(last), rest),
                        None => (None, &section.lines[..]),
                    };
                    for line in rest {
                        let _ = write!(out, "<p>{}</p>", escape(line));
                    }
                    if let Some(last) = last {
                        let _ = write!(out, "<hr><p><strong>{}</strong></p>", escape(last));
                    }
                    out.push_str("</div>");
                }
            }
        }
        out
    }
}

impl BreakdownRenderer for TextRenderer {
    fn render(&self, report: &ValuationReport) -> String {
        let mut out = String::new();
        for section in sections(report) {
            if !section.title.is_empty() {
                let _ = writeln!(out, "== {} ==", section.title);
            }
            for line in &section.lines {
                let _ = writeln!(out, "{line}");
            }
            out.push('\n');
        }
        out
    }
}

fn sections(report: &ValuationReport) -> Vec<Section> {
    vec![
        Section {
            kind:  SectionKind::Step,
            title: "Step 1: Best combo selection".into(),
            lines: selection_lines(&report.selection),
        },
        Section {
            kind:  SectionKind::Step,
            title: "Step 2: Base value of characters and weapons".into(),
            lines: base_lines(&report.base),
        },
        Section {
            kind:  SectionKind::Step,
            title: "Step 3: Character count multiplier on applicable value".into(),
            lines: multiplier_lines(&report.multiplier),
        },
        Section {
            kind:  SectionKind::Subtotal,
            title: String::new(),
            lines: vec![format!(
                "Base subtotal = adjusted applicable ({:.2}) + exempt ({:.2}) = {:.2}",
                report.multiplier.adjusted, report.base.exempt, report.base_subtotal
            )],
        },
        Section {
            kind:  SectionKind::Step,
            title: "Step 4: Resource value".into(),
            lines: resource_lines(&report.resource),
        },
        Section {
            kind:  SectionKind::Step,
            title: "Step 5: Special bonuses".into(),
            lines: special_lines(&report.special),
        },
        Section {
            kind:  SectionKind::Final,
            title: "Final total".into(),
            lines: vec![
                format!("Base subtotal   : {:.2}", report.base_subtotal),
                format!("Combo bonus     : {:.2}", report.selection.total_value),
                format!("Resource value  : {:.2}", report.resource.value),
                format!("Special bonuses : {:.2}", report.special.total),
                format!("Account valuation: {:.2}", report.final_total),
            ],
        },
    ]
}

fn selection_lines(selection: &ComboSelection) -> Vec<String> {
    if selection.is_empty() {
        return vec!["No combo matched.".into()];
    }
    let mut lines = vec![format!(
        "Best combo selection adds {:.2}:",
        selection.total_value
    )];
    for combo in &selection.combos {
        lines.push(format!("  - {} (+{:.2})", combo.name, combo.value));
    }
    lines
}

fn base_lines(base: &BaseValueRecord) -> Vec<String> {
    if base.items.is_empty() {
        return vec!["No recognized characters or weapons.".into()];
    }
    let mut lines: Vec<String> = base.items.iter().map(item_line).collect();
    lines.push(String::new());
    lines.push(format!(">> Applicable base value: {:.2}", base.applicable));
    lines.push(format!(">> Exempt base value: {:.2}", base.exempt));
    lines
}

fn item_line(item: &ItemValuation) -> String {
    let bucket = match item.bucket {
        Bucket::Applicable => "applicable",
        Bucket::Exempt => "exempt",
    };
    let (kind, level) = match item.kind {
        ItemKind::Character => ("character", format!("C{}", item.level)),
        ItemKind::Weapon => ("weapon", format!("R{}", item.level)),
    };

    let mut line = format!("  - [{bucket}] {kind} [{} {level}]: {:.2}", item.name, item.value);
    for adjustment in &item.adjustments {
        let note = match adjustment {
            Adjustment::NoSpecializedWeapon { factor } => {
                format!(" (no specialized weapon, x{factor})")
            }
            Adjustment::RepricedAtR4 { owner } => format!(" ({owner} is not C6, priced at R4)"),
            Adjustment::PremiumC6Doubled { owner } => {
                format!(" (specialized weapon of premium C6 {owner}, x2)")
            }
        };
        line.push_str(&note);
    }
    line
}

fn multiplier_lines(record: &MultiplierRecord) -> Vec<String> {
    match record.tier {
        Some(tier) => vec![
            format!(
                "Account holds {} characters; applying a {:.0}% multiplier to applicable value:",
                record.character_count,
                tier.factor * 100.0
            ),
            format!(
                "  {:.2} * {:.2} = {:.2}",
                record.input, tier.factor, record.adjusted
            ),
        ],
        None => vec![format!(
            "Account holds {} characters; no multiplier tier matched, value unchanged.",
            record.character_count
        )],
    }
}

fn resource_lines(record: &ResourceRecord) -> Vec<String> {
    let mut lines = vec![format!(
        "Resources: {} primary + {} secondary = {} pulls",
        record.primary_currency, record.secondary_currency, record.total_pulls
    )];
    if record.below_floor {
        lines.push("Below the pull floor, not valued.".into());
        return lines;
    }
    if let Some(tier) = record.tier {
        lines.push(format!(
            "  - {} pulls: {} * {:.2} = {:.2}",
            record.total_pulls, record.total_pulls, tier.unit_price, record.value
        ));
    }
    lines.push(format!("Resource value: {:.2}", record.value));
    lines
}

fn special_lines(record: &SpecialBonusRecord) -> Vec<String> {
    if record.awards.is_empty() {
        return vec!["No special rule triggered.".into()];
    }
    record
        .awards
        .iter()
        .map(|award| match award {
            SpecialAward::SpecialCharacters { combo, count, bonus } => format!(
                "  - Combo [{combo}] holds {count} special C2-C5 characters, +{bonus:.2}"
            ),
            SpecialAward::HotC6 { character, bonus } => {
                format!("  - Hot C6 character [{character}], +{bonus:.2}")
            }
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
