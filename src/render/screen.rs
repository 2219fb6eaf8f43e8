//! Screen projection: report model to view ops
//!
//! [`project`] is a pure function of the model. Every section it emits
//! replaces the mount point's previous content, so applying the same frame
//! twice leaves the view unchanged.

use crate::badge::{self, Badge, BadgeCategory};
use crate::model::{
    condition_clause, join_digits, Compatibility, ConditionalRemedy, LetterValue, LoshuGrid,
    LoshuLines, LuckFactor, NameAnalysis, NumberKind, PlanetRemedy, RemedyTier, ReportDataModel,
    RuleEntry, RuleOutcome,
};
use crate::render::view::{MountPoint, ScreenFrame, ViewNode};
use crate::theme::{self, Tone};
use log::debug;

/// Project the whole model into one frame of view ops
pub fn project(model: &ReportDataModel) -> ScreenFrame {
    let mut frame = ScreenFrame::new();

    project_header(model, &mut frame);
    project_grid(&model.grid, &mut frame);
    frame.set_text(
        MountPoint::PresentNumbersList,
        join_digits(&model.present_numbers),
    );
    project_missing(&model.missing_numbers, &mut frame);
    project_lines(&model.lines, &mut frame);

    for kind in NumberKind::ALL {
        match model.compatibility(kind) {
            Some(compat) => project_compatibility(kind, model.numbers.get(kind), compat, &mut frame),
            None => debug!("no {} compatibility data, leaving panel untouched", kind.label()),
        }
    }

    frame.replace(
        MountPoint::LuckyNumbersSummary,
        badge_nodes(&badge::badges(&model.lucky_numbers, BadgeCategory::Lucky)),
    );
    frame.replace(
        MountPoint::BadNumbersSummary,
        badge_nodes(&badge::badges(&model.bad_numbers, BadgeCategory::Bad)),
    );
    frame.replace(
        MountPoint::NeutralNumbersSummary,
        badge_nodes(&badge::badges(
            &model.neutral_numbers,
            BadgeCategory::NeutralNumber,
        )),
    );

    project_conditional_remedies(RemedyTier::Missing, &model.remedies.missing, &mut frame);
    project_conditional_remedies(RemedyTier::Yantra, &model.remedies.yantra, &mut frame);
    project_planet_remedies(&model.remedies.planetary, &mut frame);
    project_luck(&model.luck_factors, &mut frame);

    match &model.name_analysis {
        Some(analysis) => project_name(analysis, &mut frame),
        None => debug!("no name analysis, leaving panel untouched"),
    }

    frame
}

fn project_header(model: &ReportDataModel, frame: &mut ScreenFrame) {
    frame.set_text(MountPoint::ResultName, model.subject_name.clone());
    frame.set_text(
        MountPoint::ResultDob,
        format!("Born on {}", model.birth_date_label()),
    );
    frame.set_text(MountPoint::DriverValue, model.numbers.driver.to_string());
    frame.set_text(MountPoint::ConductorValue, model.numbers.conductor.to_string());
    frame.set_text(MountPoint::KuaValue, model.numbers.kua.to_string());
}

fn project_grid(grid: &LoshuGrid, frame: &mut ScreenFrame) {
    let tiles = grid
        .cells()
        .map(|cell| {
            let state = if cell.present { "present" } else { "missing" };
            let tile = ViewNode::new("div")
                .class("loshu-cell")
                .class(state)
                .text(cell.digit.to_string())
                .tone(theme::grid_tone(cell.present));
            match cell.multiplicity_marker() {
                Some(marker) => tile.child(ViewNode::new("span").class("loshu-count").text(marker)),
                None => tile,
            }
        })
        .collect();
    frame.replace(MountPoint::LoshuGrid, tiles);
}

fn project_missing(missing: &[u8], frame: &mut ScreenFrame) {
    frame.replace(
        MountPoint::MissingNumbersList,
        badge_nodes(&badge::badges(missing, BadgeCategory::Missing)),
    );
    frame.set_visible(MountPoint::MissingNumbers, !missing.is_empty());
}

fn project_lines(lines: &LoshuLines, frame: &mut ScreenFrame) {
    let children = if lines.is_empty() {
        vec![ViewNode::new("div")
            .class("no-lines-message")
            .text(LoshuLines::EMPTY_MESSAGE)]
    } else {
        lines
            .all
            .iter()
            .map(|line| {
                let kind = line.kind.as_str();
                let header = ViewNode::new("div")
                    .class("line-header")
                    .child(ViewNode::new("div").class("line-name").text(line.name.clone()))
                    .child(
                        ViewNode::new("span")
                            .class("line-type")
                            .class(kind)
                            .text(kind)
                            .tone(theme::line_tone(line.kind)),
                    );
                let digits = ViewNode::new("div")
                    .class("line-numbers")
                    .children(badge_nodes(&badge::badges(&line.digits, BadgeCategory::LineDigit)));
                ViewNode::new("div")
                    .class("line-item")
                    .class(kind)
                    .child(header)
                    .child(digits)
                    .child(
                        ViewNode::new("div")
                            .class("line-description")
                            .text(line.description.clone()),
                    )
            })
            .collect()
    };
    frame.replace(MountPoint::LinesContainer, children);
    frame.set_visible(MountPoint::LoshuLines, true);
}

fn project_compatibility(
    kind: NumberKind,
    number: u32,
    compat: &Compatibility,
    frame: &mut ScreenFrame,
) {
    frame.set_text(MountPoint::CompatNumber(kind), number.to_string());
    frame.set_text(MountPoint::Planet(kind), compat.planet.clone());

    let groups = [
        (
            MountPoint::Friends(kind),
            badge::raw_badge(Some(compat.friends_raw.as_str()), BadgeCategory::Friends),
        ),
        (
            MountPoint::NonFriends(kind),
            badge::raw_badge(compat.non_friends(), BadgeCategory::NonFriends),
        ),
        (
            MountPoint::Neutral(kind),
            badge::raw_badge(Some(compat.neutral_raw.as_str()), BadgeCategory::Neutral),
        ),
    ];
    for (mount, group) in groups {
        frame.replace(mount, vec![badge_node(&group)]);
    }
}

fn remedy_card(title: &str, body: &str) -> ViewNode {
    ViewNode::new("div")
        .class("remedy-card")
        .child(
            ViewNode::new("div")
                .class("condition")
                .text(title)
                .tone(Tone::Remedy),
        )
        .child(ViewNode::new("div").class("remedy-text").text(body))
}

fn no_remedies(tier: RemedyTier) -> ViewNode {
    ViewNode::new("div")
        .class("no-remedies")
        .text(tier.empty_message())
        .tone(Tone::AllClear)
}

fn project_conditional_remedies(
    tier: RemedyTier,
    remedies: &[ConditionalRemedy],
    frame: &mut ScreenFrame,
) {
    let children = if remedies.is_empty() {
        vec![no_remedies(tier)]
    } else {
        remedies
            .iter()
            .map(|r| match tier {
                RemedyTier::Missing => remedy_card(&condition_clause(&r.condition), &r.remedy),
                // Part 2 conditions stay verbatim under the label, no "If" clause
                _ => remedy_card(&r.remedy, &format!("Condition: {}", r.condition)),
            })
            .collect()
    };
    frame.replace(MountPoint::Remedies(tier), children);
}

fn header_row(labels: &[&str]) -> ViewNode {
    ViewNode::new("thead").child(
        ViewNode::new("tr").children(labels.iter().map(|l| ViewNode::new("th").text(*l))),
    )
}

fn project_planet_remedies(remedies: &[PlanetRemedy], frame: &mut ScreenFrame) {
    let children = if remedies.is_empty() {
        vec![no_remedies(RemedyTier::Planetary)]
    } else {
        let rows = remedies.iter().map(|item| {
            let remedy_cell = ViewNode::new("td").class("remedy-col");
            let remedy_cell = match item.remedies.as_slice() {
                [single] => remedy_cell.text(single.clone()),
                many => remedy_cell.child(
                    ViewNode::new("ul")
                        .children(many.iter().map(|r| ViewNode::new("li").text(r.clone()))),
                ),
            };
            ViewNode::new("tr")
                .child(
                    ViewNode::new("td")
                        .class("number-col")
                        .text(item.digit.to_string()),
                )
                .child(ViewNode::new("td").class("planet-col").text(item.planet.clone()))
                .child(remedy_cell)
        });
        vec![ViewNode::new("table")
            .class("remedies-table")
            .child(header_row(&["No.", "Planet", "Remedy / Action"]))
            .child(ViewNode::new("tbody").children(rows))]
    };
    frame.replace(MountPoint::Remedies(RemedyTier::Planetary), children);
}

fn project_luck(factors: &[LuckFactor], frame: &mut ScreenFrame) {
    if factors.is_empty() {
        frame.replace(MountPoint::LuckFactors, Vec::new());
        return;
    }
    let rows = factors.iter().map(|item| {
        ViewNode::new("tr")
            .child(ViewNode::new("td").class("year-col").text(item.year.to_string()))
            .child(ViewNode::new("td").text(item.date_label()))
            .child(
                ViewNode::new("td")
                    .class("combination-col")
                    .text(item.combination.clone()),
            )
            .child(
                ViewNode::new("td")
                    .class("percentage-col")
                    .text(item.luck_factor.clone()),
            )
    });
    let table = ViewNode::new("table")
        .class("luck-factor-table")
        .child(header_row(&["Year", "Date", "PY, D", "Luck Factor"]))
        .child(ViewNode::new("tbody").children(rows));
    frame.replace(MountPoint::LuckFactors, vec![table]);
}

fn breakdown_nodes(letters: &[LetterValue]) -> Vec<ViewNode> {
    letters
        .iter()
        .map(|entry| match entry {
            LetterValue::Letter { letter, value } => ViewNode::new("div")
                .class("letter-value")
                .child(ViewNode::new("div").class("letter").text(letter.to_string()))
                .child(ViewNode::new("div").class("value").text(value.to_string())),
            LetterValue::Space => ViewNode::new("div")
                .class("letter-value")
                .class("space")
                .text(LetterValue::SEPARATOR),
        })
        .collect()
}

fn rule_nodes(outcome: RuleOutcome, rules: &[RuleEntry]) -> Vec<ViewNode> {
    if rules.is_empty() {
        return vec![ViewNode::new("div")
            .class("no-rules")
            .text(outcome.empty_message())];
    }
    rules
        .iter()
        .map(|rule| {
            ViewNode::new("div")
                .class("rule-item")
                .class(rule.status.as_class())
                .tone(theme::rule_tone(outcome))
                .child(ViewNode::new("div").class("rule-label").text(rule.label.clone()))
                .child(
                    ViewNode::new("div")
                        .class("rule-description")
                        .text(rule.description.clone()),
                )
        })
        .collect()
}

fn project_name(analysis: &NameAnalysis, frame: &mut ScreenFrame) {
    frame.set_text(MountPoint::FirstName, analysis.first_name.clone());
    frame.set_text(
        MountPoint::FirstNameValue,
        analysis.first_name_value.to_string(),
    );
    frame.replace(
        MountPoint::FirstNameBreakdown,
        breakdown_nodes(&analysis.first_name_breakdown.letters),
    );
    frame.set_text(MountPoint::FullName, analysis.full_name.clone());
    frame.set_text(MountPoint::FullNameValue, analysis.full_name_value.to_string());
    frame.replace(
        MountPoint::FullNameBreakdown,
        breakdown_nodes(&analysis.full_name_breakdown.letters),
    );
    for outcome in [RuleOutcome::Followed, RuleOutcome::Contradicted] {
        frame.replace(
            MountPoint::Rules(outcome),
            rule_nodes(outcome, analysis.rules(outcome)),
        );
    }
}

/// View node for one badge
pub fn badge_node(badge: &Badge) -> ViewNode {
    match badge {
        Badge::Value { text, category } => {
            let node = ViewNode::new("div").class(category.base_class());
            let node = match category.modifier_class() {
                Some(modifier) => node.class(modifier),
                None => node,
            };
            node.text(text.clone()).tone(badge.tone())
        }
        Badge::Placeholder => ViewNode::new("p")
            .class("none")
            .text(badge::NONE_LABEL)
            .tone(Tone::Muted),
    }
}

fn badge_nodes(badges: &[Badge]) -> Vec<ViewNode> {
    badges.iter().map(badge_node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::render::view::ViewOp;

    fn replaced(frame: &ScreenFrame, mount: MountPoint) -> Vec<ViewNode> {
        frame
            .ops_for(mount)
            .filter_map(|op| match op {
                ViewOp::Replace { children, .. } => Some(children.clone()),
                _ => None,
            })
            .last()
            .unwrap_or_default()
    }

    #[test]
    fn test_grid_tiles_follow_present_flag() {
        let frame = project(&fixtures::model());
        let tiles = replaced(&frame, MountPoint::LoshuGrid);
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0].text.as_deref(), Some("4"));
        assert!(tiles[0].has_class("present"));
        assert_eq!(tiles[3].tone, Some(Tone::Missing));
        assert_eq!(tiles[0].children[0].text.as_deref(), Some("×2"));
        assert!(tiles[2].children.is_empty());
    }

    #[test]
    fn test_multiplicity_marker_ignores_present_flag() {
        let json = fixtures::RESPONSE_JSON.replace(
            r#"{"value": 3, "present": false, "count": 0}"#,
            r#"{"value": 3, "present": false, "count": 2}"#,
        );
        let model = ReportDataModel::from_response(&json).unwrap();
        let tiles = replaced(&project(&model), MountPoint::LoshuGrid);
        let three = &tiles[3];
        assert!(three.has_class("missing"));
        assert_eq!(three.children[0].text.as_deref(), Some("×2"));
    }

    #[test]
    fn test_missing_section_hidden_when_empty() {
        let mut model = fixtures::model();
        model.missing_numbers.clear();
        let frame = project(&model);
        assert!(frame.ops.contains(&ViewOp::SetVisible {
            mount: MountPoint::MissingNumbers,
            visible: false
        }));
    }

    #[test]
    fn test_lines_empty_state() {
        let frame = project(&fixtures::sparse_model());
        let children = replaced(&frame, MountPoint::LinesContainer);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text.as_deref(), Some(LoshuLines::EMPTY_MESSAGE));
        assert!(frame.ops.contains(&ViewOp::SetVisible {
            mount: MountPoint::LoshuLines,
            visible: true
        }));
    }

    #[test]
    fn test_absent_compatibility_is_a_no_op() {
        let frame = project(&fixtures::sparse_model());
        for kind in NumberKind::ALL {
            assert_eq!(frame.ops_for(MountPoint::Planet(kind)).count(), 0);
            assert_eq!(frame.ops_for(MountPoint::Friends(kind)).count(), 0);
        }
    }

    #[test]
    fn test_non_friends_sentinel_renders_none() {
        let frame = project(&fixtures::model());
        let driver = replaced(&frame, MountPoint::NonFriends(NumberKind::Driver));
        assert_eq!(driver[0].text.as_deref(), Some("None"));
        assert_eq!(driver[0].tone, Some(Tone::Muted));

        let conductor = replaced(&frame, MountPoint::NonFriends(NumberKind::Conductor));
        assert_eq!(conductor[0].text.as_deref(), Some("2, 9"));
        assert!(conductor[0].has_class("non-friends"));
    }

    #[test]
    fn test_remedy_cards() {
        let frame = project(&fixtures::model());
        let part1 = replaced(&frame, MountPoint::Remedies(RemedyTier::Missing));
        assert_eq!(part1[0].children[0].text.as_deref(), Some("If 3 is missing"));
        assert_eq!(part1[1].children[0].text.as_deref(), Some("If 8 is missing"));

        let part2 = replaced(&frame, MountPoint::Remedies(RemedyTier::Yantra));
        assert_eq!(part2[0].children[0].text.as_deref(), Some("Install a Shukra Yantra"));
        assert_eq!(
            part2[0].children[1].text.as_deref(),
            Some("Condition: 6 and 7 are both missing")
        );
    }

    #[test]
    fn test_planet_remedies_single_inline_many_listed() {
        let frame = project(&fixtures::model());
        let table = &replaced(&frame, MountPoint::Remedies(RemedyTier::Planetary))[0];
        let body = &table.children[1];
        let first_remedy = &body.children[0].children[2];
        assert_eq!(first_remedy.children[0].tag, "ul");
        assert_eq!(first_remedy.children[0].children.len(), 2);
        let second_remedy = &body.children[1].children[2];
        assert_eq!(second_remedy.text.as_deref(), Some("Use a silver glass for water"));
        assert!(second_remedy.children.is_empty());
    }

    #[test]
    fn test_remedy_empty_states_are_tier_specific() {
        let frame = project(&fixtures::sparse_model());
        for tier in [RemedyTier::Missing, RemedyTier::Yantra, RemedyTier::Planetary] {
            let children = replaced(&frame, MountPoint::Remedies(tier));
            assert_eq!(children[0].text.as_deref(), Some(tier.empty_message()));
        }
    }

    #[test]
    fn test_breakdown_space_is_separator() {
        let frame = project(&fixtures::model());
        let full = replaced(&frame, MountPoint::FullNameBreakdown);
        assert_eq!(full.len(), 8);
        assert!(full[4].has_class("space"));
        assert_eq!(full[4].text.as_deref(), Some("•"));
        assert!(full[4].children.is_empty());
        assert_eq!(full[5].children[1].text.as_deref(), Some("2"));
    }

    #[test]
    fn test_rule_lists() {
        let mut model = fixtures::model();
        let frame = project(&model);
        let contradicted = replaced(&frame, MountPoint::Rules(RuleOutcome::Contradicted));
        assert_eq!(contradicted.len(), 2);
        assert!(contradicted[1].has_class("suggestion"));
        assert_eq!(contradicted[0].tone, Some(Tone::Negative));

        if let Some(analysis) = model.name_analysis.as_mut() {
            analysis.followed_rules.clear();
        }
        let frame = project(&model);
        let followed = replaced(&frame, MountPoint::Rules(RuleOutcome::Followed));
        assert_eq!(followed[0].text.as_deref(), Some("No rules followed yet"));
    }

    #[test]
    fn test_luck_table_columns() {
        let frame = project(&fixtures::model());
        let table = &replaced(&frame, MountPoint::LuckFactors)[0];
        let first_row = &table.children[1].children[0];
        let cells: Vec<_> = first_row
            .children
            .iter()
            .map(|c| c.text.clone().unwrap_or_default())
            .collect();
        assert_eq!(cells, vec!["2026", "14/05/2026", "5,5", "Excellent"]);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let model = fixtures::model();
        assert_eq!(project(&model), project(&model));
    }
}
