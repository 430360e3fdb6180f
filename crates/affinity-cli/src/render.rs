//! Plain-text rendering for terminal output
//!
//! Each renderer collects its lines and returns them newline-terminated.

use affinity_core::{
    AffinityEntry, Category, ConflictAlert, MemberDirectory, MemberId, PairAffinity,
    TeamAffinityResult,
};

pub fn grid(grid: &[[Option<u8>; 12]; 12]) -> String {
    let header: String = Category::ALL
        .iter()
        .map(|&category| format!(" {:>4}", abbrev(category)))
        .collect();
    let mut lines = vec![format!("{:>12}{}", "", header)];

    for (row, category) in grid.iter().zip(Category::ALL) {
        let cells: String = row
            .iter()
            .map(|cell| match cell {
                Some(score) => format!(" {:>4}", score),
                None => format!(" {:>4}", "-"),
            })
            .collect();
        lines.push(format!("{:>12}{}", category.name(), cells));
    }
    join(lines)
}

pub fn entry(entry: &AffinityEntry) -> String {
    join(vec![
        format!(
            "{} {} x {} {}",
            entry.category1.symbol(),
            entry.category1,
            entry.category2,
            entry.category2.symbol()
        ),
        format!(
            "OVERALL: {} ({}, {})",
            entry.overall_score, entry.level, entry.element_harmony
        ),
        format!(
            "WORK: {}  COMMUNICATION: {}  SYNERGY: {}  CONFLICT POTENTIAL: {}",
            entry.work_score, entry.communication_score, entry.synergy_score, entry.conflict_potential
        ),
        format!("STRENGTHS: {}", entry.strengths),
        format!("CHALLENGES: {}", entry.challenges),
        format!("TIPS: {}", entry.tips),
        format!("BEST COLLABORATION: {}", entry.best_collaboration),
    ])
}

pub fn team<D: MemberDirectory>(result: &TeamAffinityResult, directory: &D) -> String {
    let name = |id: MemberId| {
        directory
            .get_member(id)
            .map(|m| m.label())
            .unwrap_or_else(|_| id.to_string())
    };
    let pair_line = |pair: &PairAffinity| {
        format!(
            "  {} + {}: {}",
            name(pair.member_a),
            name(pair.member_b),
            pair.overall_score
        )
    };

    let mut lines = vec![format!(
        "TEAM: {} members, average {:.2} ({})",
        result.team_size, result.average_score, result.level
    )];
    lines.extend(result.member_ids.iter().map(|&id| format!("  - {}", name(id))));

    let histogram: Vec<String> = result
        .element_histogram
        .iter()
        .map(|(element, count)| format!("{}={}", element, count))
        .collect();
    lines.push(format!("ELEMENTS: {}", histogram.join(" ")));

    if !result.best_pairs.is_empty() {
        lines.push("BEST PAIRS:".to_string());
        lines.extend(result.best_pairs.iter().map(&pair_line));
    }

    if result.has_conflicts() {
        lines.push("CONFLICTS:".to_string());
        lines.extend(result.conflicts.iter().map(&pair_line));
    }

    lines.extend(result.insights.iter().map(|insight| format!("* {}", insight)));
    join(lines)
}

pub fn alerts(alerts: &[ConflictAlert]) -> String {
    if alerts.is_empty() {
        return "No conflicts found.\n".to_string();
    }

    join(
        alerts
            .iter()
            .map(|alert| {
                format!(
                    "[{}] {} ({}) x {} ({}): {}",
                    alert.severity,
                    alert.member_a,
                    alert.category_a,
                    alert.member_b,
                    alert.category_b,
                    alert.overall_score
                )
            })
            .collect(),
    )
}

fn abbrev(category: Category) -> &'static str {
    &category.name()[..3]
}

fn join(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
