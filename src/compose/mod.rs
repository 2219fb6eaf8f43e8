//! Document composer: the fixed section sequence of the exported report
//!
//! Sections are laid out top to bottom on a [`PageCursor`]. Each one starts
//! with a threshold check; tables are handed to [`TableLayout`] and the
//! composer resumes below wherever the table ended. Colours come from
//! [`Tone`] only, so the document matches the screen item for item.

use crate::badge::{self, BadgeCategory};
use crate::config::ReportConfig;
use crate::error::ExportError;
use crate::export::DocumentEngine;
use crate::layout::{
    Align, Cell, CellStyle, Column, DrawnCell, FontLibrary, FontStyle, LineBreaker, PageCursor,
    Table, TableLayout, TableSection, TableTheme, VAlign,
};
use crate::model::{
    condition_clause, join_digits, long_date, Compatibility, ConditionalRemedy, LoshuGrid,
    NameAnalysis, NumberKind, PlanetRemedy, RemedyTier, ReportDataModel, RuleOutcome,
};
use crate::theme::{self, Rgb, Tone};
use log::debug;

pub const REPORT_TITLE: &str = "Numerology Report";

/// Vertical step between wrapped lines of a remedy body, mm
const REMEDY_LINE_STEP: f32 = 5.0;

/// Compose the whole report onto `engine` with the default fonts. Returns
/// the number of pages produced.
pub fn compose(
    model: &ReportDataModel,
    engine: &mut dyn DocumentEngine,
    config: &ReportConfig,
) -> Result<usize, ExportError> {
    let fonts = FontLibrary::new();
    DocumentComposer::new(engine, &fonts, config).compose(model)
}

pub struct DocumentComposer<'a> {
    engine: &'a mut dyn DocumentEngine,
    fonts: &'a FontLibrary,
    config: &'a ReportConfig,
    cursor: PageCursor,
}

impl<'a> DocumentComposer<'a> {
    pub fn new(
        engine: &'a mut dyn DocumentEngine,
        fonts: &'a FontLibrary,
        config: &'a ReportConfig,
    ) -> Self {
        Self {
            engine,
            fonts,
            config,
            cursor: PageCursor::new(config.page),
        }
    }

    pub fn compose(mut self, model: &ReportDataModel) -> Result<usize, ExportError> {
        self.engine.begin(&self.config.page)?;

        self.title()?;
        self.identity(model)?;
        self.grid(&model.grid)?;
        self.core_numbers(model)?;
        self.present_and_missing(model)?;
        self.compatibility(model)?;
        self.summary(model)?;
        self.lines(model)?;
        self.conditional_remedies(RemedyTier::Missing, &model.remedies.missing)?;
        self.conditional_remedies(RemedyTier::Yantra, &model.remedies.yantra)?;
        self.planet_remedies(&model.remedies.planetary)?;
        self.luck(model)?;
        match &model.name_analysis {
            Some(analysis) => self.name(analysis)?,
            None => debug!("no name analysis, section skipped"),
        }

        debug!(
            "composed report for {} on {} pages",
            model.subject_name,
            self.engine.page_count()
        );
        Ok(self.engine.page_count())
    }

    fn margin_left(&self) -> f32 {
        self.config.page.margin_left
    }

    /// Break before `section` when the cursor is past `threshold`
    fn guard(&mut self, threshold: f32, section: &str) -> Result<(), ExportError> {
        let y = self.cursor.y();
        if self.cursor.ensure(threshold) {
            debug!(
                "page break before {} (y {:.1} past {:.1}), now page {}",
                section,
                y,
                threshold,
                self.cursor.page()
            );
            self.engine.add_page()?;
        }
        Ok(())
    }

    /// Break unless a block of `height` fits, or when past `threshold`
    fn keep_together(&mut self, height: f32, threshold: f32, section: &str) -> Result<(), ExportError> {
        let y = self.cursor.y();
        if self.cursor.reserve(height, threshold) {
            debug!(
                "page break before {} (y {:.1}, block {:.1}), now page {}",
                section,
                y,
                height,
                self.cursor.page()
            );
            self.engine.add_page()?;
        }
        Ok(())
    }

    fn write(
        &mut self,
        x: f32,
        text: &str,
        style: FontStyle,
        size: f32,
        tone: Tone,
    ) -> Result<(), ExportError> {
        self.engine.set_font(style, size);
        self.engine.set_text_color(tone.text_color());
        self.engine.text(x, self.cursor.y(), text)
    }

    fn heading(&mut self, text: &str, gap: f32) -> Result<(), ExportError> {
        self.write(self.margin_left(), text, FontStyle::Normal, 14.0, Tone::Accent)?;
        self.cursor.advance(gap);
        Ok(())
    }

    fn subheading(&mut self, text: &str) -> Result<(), ExportError> {
        self.write(self.margin_left(), text, FontStyle::Italic, 10.0, Tone::Muted)?;
        self.cursor.advance(10.0);
        Ok(())
    }

    /// A coloured label followed by a body-coloured value on the same line
    fn labelled(
        &mut self,
        label: &str,
        tone: Tone,
        value_x: f32,
        value: &str,
        size: f32,
    ) -> Result<(), ExportError> {
        self.write(self.margin_left(), label, FontStyle::Normal, size, tone)?;
        self.write(value_x, value, FontStyle::Normal, size, Tone::Body)
    }

    fn render_table(&mut self, table: &Table, gap: f32) -> Result<(), ExportError> {
        let end = TableLayout::new(self.fonts).render(table, &mut *self.engine, &mut self.cursor)?;
        self.cursor.resume_at(end + gap);
        Ok(())
    }

    fn title(&mut self) -> Result<(), ExportError> {
        let size = 20.0;
        let width = self.fonts.text_width(REPORT_TITLE, FontStyle::Normal, size);
        let x = Align::Center.left_edge(self.config.page.center_x(), width);
        self.write(x, REPORT_TITLE, FontStyle::Normal, size, Tone::Accent)?;
        self.cursor.advance(15.0);
        Ok(())
    }

    fn identity(&mut self, model: &ReportDataModel) -> Result<(), ExportError> {
        let x = self.margin_left();
        let lines = [
            (format!("Name: {}", model.subject_name), 8.0),
            (
                format!("Date of Birth: {}", long_date(model.date_of_birth)),
                8.0,
            ),
            (format!("Gender: {}", model.gender.label()), 15.0),
        ];
        for (line, gap) in lines {
            self.write(x, &line, FontStyle::Normal, 12.0, Tone::Body)?;
            self.cursor.advance(gap);
        }
        Ok(())
    }

    fn grid(&mut self, grid: &LoshuGrid) -> Result<(), ExportError> {
        self.guard(self.config.thresholds.grid, "loshu grid")?;
        self.heading("Your Personalized Loshu Grid", 12.0)?;

        let mut table = Table::new(TableTheme::Grid)
            .styles(CellStyle {
                font_style: Some(FontStyle::Bold),
                font_size: Some(18.0),
                halign: Some(Align::Center),
                ..CellStyle::default()
            })
            .columns(vec![
                Column {
                    width: Some(20.0),
                    ..Column::default()
                };
                3
            ])
            .padding(8.0)
            .valign(VAlign::Middle);
        let width = self.config.page.width;
        let left = 75.0;
        table = table.margins(left, width - left - 60.0);

        for row in grid.rows() {
            table = table.row(row.iter().map(|cell| {
                let palette = theme::grid_cell_palette(cell.present);
                Cell::styled(
                    cell.digit.to_string(),
                    CellStyle {
                        text_color: Some(palette.text),
                        fill: Some(palette.fill),
                        border: Some(palette.border),
                        border_width: Some(palette.border_width),
                        ..CellStyle::default()
                    },
                )
            }));
        }

        let fonts = self.fonts;
        let end = TableLayout::new(fonts).render_with(
            &table,
            &mut *self.engine,
            &mut self.cursor,
            |drawn: &DrawnCell, engine: &mut dyn DocumentEngine| {
                if drawn.section != TableSection::Body {
                    return Ok(());
                }
                let Some(cell) = grid.cell(drawn.row, drawn.column) else {
                    return Ok(());
                };
                let Some(marker) = cell.multiplicity_marker() else {
                    return Ok(());
                };
                let size = 7.0;
                let right = drawn.rect.right() - 4.0;
                let x = Align::Right.left_edge(right, fonts.text_width(&marker, FontStyle::Normal, size));
                engine.set_font(FontStyle::Normal, size);
                engine.set_text_color(theme::grid_tone(cell.present).text_color());
                engine.text(x, drawn.rect.y + 4.0, &marker)
            },
        )?;
        self.cursor.resume_at(end + 15.0);
        Ok(())
    }

    fn core_numbers(&mut self, model: &ReportDataModel) -> Result<(), ExportError> {
        self.keep_together(24.0, self.config.page.bottom_limit(), "core numbers")?;
        self.heading("Your Numbers", 10.0)?;
        let x = self.margin_left();
        let numbers = &model.numbers;
        let lines = [
            (format!("Driver Number: {}", numbers.driver), 7.0),
            (format!("Conductor Number: {}", numbers.conductor), 7.0),
            (format!("Kua Number: {}", numbers.kua), 15.0),
        ];
        for (line, gap) in lines {
            self.write(x, &line, FontStyle::Normal, 11.0, Tone::Body)?;
            self.cursor.advance(gap);
        }
        Ok(())
    }

    fn present_and_missing(&mut self, model: &ReportDataModel) -> Result<(), ExportError> {
        self.keep_together(8.0, self.config.page.bottom_limit(), "present numbers")?;
        self.labelled(
            "Numbers Present in Your Life:",
            Tone::Positive,
            90.0,
            &join_digits(&model.present_numbers),
            11.0,
        )?;
        self.cursor.advance(8.0);

        if model.missing_numbers.is_empty() {
            debug!("no missing numbers, line skipped");
        } else {
            self.labelled(
                "Missing Numbers:",
                BadgeCategory::Missing.tone(),
                90.0,
                &join_digits(&model.missing_numbers),
                11.0,
            )?;
            self.cursor.advance(15.0);
        }
        Ok(())
    }

    fn compatibility(&mut self, model: &ReportDataModel) -> Result<(), ExportError> {
        let present: Vec<_> = NumberKind::ALL
            .iter()
            .filter_map(|kind| model.compatibility(*kind).map(|c| (*kind, c)))
            .collect();
        if present.is_empty() {
            debug!("no compatibility data, section skipped");
            return Ok(());
        }

        self.guard(self.config.thresholds.compatibility, "compatibility")?;
        self.heading("Number Compatibility", 12.0)?;
        let last = present.len() - 1;
        for (i, (kind, compat)) in present.into_iter().enumerate() {
            let gap = if i == last { 15.0 } else { 12.0 };
            self.compatibility_block(kind, model.numbers.get(kind), compat, gap)?;
        }
        Ok(())
    }

    fn compatibility_block(
        &mut self,
        kind: NumberKind,
        number: u32,
        compat: &Compatibility,
        gap: f32,
    ) -> Result<(), ExportError> {
        let x = self.margin_left();
        self.write(
            x,
            &format!("{} Number {}", kind.label(), number),
            FontStyle::Normal,
            12.0,
            Tone::Accent,
        )?;
        self.cursor.advance(6.0);
        self.write(x, &compat.planet, FontStyle::Italic, 10.0, Tone::Muted)?;
        self.cursor.advance(8.0);

        let groups = [
            ("Friends:", 50.0, Some(compat.friends_raw.as_str()), BadgeCategory::Friends, 6.0),
            ("Non-Friends:", 55.0, compat.non_friends(), BadgeCategory::NonFriends, 6.0),
            ("Neutral:", 50.0, Some(compat.neutral_raw.as_str()), BadgeCategory::Neutral, gap),
        ];
        for (label, value_x, raw, category, advance) in groups {
            let group = badge::raw_badge(raw, category);
            self.write(x + 5.0, label, FontStyle::Normal, 10.0, category.tone())?;
            let value_tone = if group.is_placeholder() {
                Tone::Muted
            } else {
                Tone::Body
            };
            self.write(value_x, group.text(), FontStyle::Normal, 10.0, value_tone)?;
            self.cursor.advance(advance);
        }
        Ok(())
    }

    fn summary(&mut self, model: &ReportDataModel) -> Result<(), ExportError> {
        self.guard(self.config.thresholds.summary, "number summary")?;
        self.heading("Number Summary", 10.0)?;
        let groups = [
            ("Lucky Numbers:", &model.lucky_numbers, BadgeCategory::Lucky, 7.0),
            ("Bad Numbers:", &model.bad_numbers, BadgeCategory::Bad, 7.0),
            (
                "Neutral Numbers:",
                &model.neutral_numbers,
                BadgeCategory::NeutralNumber,
                15.0,
            ),
        ];
        for (label, digits, category, gap) in groups {
            let value = badge::joined(&badge::badges(digits, category));
            self.labelled(label, category.tone(), 70.0, &value, 11.0)?;
            self.cursor.advance(gap);
        }
        Ok(())
    }

    fn accent_head() -> CellStyle {
        CellStyle {
            fill: Some(Tone::Accent.text_color()),
            text_color: Some(Rgb::WHITE),
            font_style: Some(FontStyle::Bold),
            ..CellStyle::default()
        }
    }

    fn lines(&mut self, model: &ReportDataModel) -> Result<(), ExportError> {
        if model.lines.is_empty() {
            debug!("no complete lines, section skipped");
            return Ok(());
        }
        self.guard(self.config.thresholds.lines, "complete lines")?;
        self.heading("Complete Lines in Your Loshu Grid", 10.0)?;

        let column = |width: f32, style: CellStyle| Column {
            width: Some(width),
            style,
        };
        let mut table = Table::new(TableTheme::Striped)
            .head(["Type", "Numbers", "Line Name", "Description"])
            .head_styles(Self::accent_head())
            .styles(CellStyle {
                font_size: Some(9.0),
                ..CellStyle::default()
            })
            .padding(4.0)
            .columns(vec![
                column(
                    25.0,
                    CellStyle {
                        font_style: Some(FontStyle::Bold),
                        ..CellStyle::default()
                    },
                ),
                column(
                    20.0,
                    CellStyle {
                        halign: Some(Align::Center),
                        ..CellStyle::default()
                    },
                ),
                column(55.0, CellStyle::default()),
                // Description takes what is left of the content width
                Column::default(),
            ]);
        for line in &model.lines.all {
            let kind = Cell::styled(
                line.kind.label(),
                CellStyle {
                    text_color: Some(theme::line_tone(line.kind).text_color()),
                    ..CellStyle::default()
                },
            );
            table = table.row([
                kind,
                Cell::from(line.digits_label()),
                Cell::from(line.name.as_str()),
                Cell::from(line.description.as_str()),
            ]);
        }
        self.render_table(&table, 15.0)
    }

    fn conditional_remedies(
        &mut self,
        tier: RemedyTier,
        remedies: &[ConditionalRemedy],
    ) -> Result<(), ExportError> {
        self.guard(self.config.thresholds.remedies, tier.heading())?;
        if tier == RemedyTier::Missing {
            self.heading("Remedies for Missing Numbers", 8.0)?;
        }
        self.subheading(tier.heading())?;

        if remedies.is_empty() {
            self.write(
                self.margin_left(),
                tier.empty_message(),
                FontStyle::Normal,
                10.0,
                Tone::AllClear,
            )?;
            self.cursor.advance(10.0);
            return Ok(());
        }

        for remedy in remedies {
            let (title, body) = match tier {
                RemedyTier::Missing => (
                    condition_clause(&remedy.condition).to_uppercase(),
                    remedy.remedy.clone(),
                ),
                // Part 2 conditions stay verbatim under the label, no "If" clause
                _ => (
                    remedy.remedy.to_uppercase(),
                    format!("Condition: {}", remedy.condition),
                ),
            };
            self.remedy_entry(&title, &body)?;
        }
        Ok(())
    }

    /// Title and wrapped body of one remedy, never split across pages
    fn remedy_entry(&mut self, title: &str, body: &str) -> Result<(), ExportError> {
        let size = 10.0;
        let x = self.margin_left();
        let lines = LineBreaker::new(self.fonts).wrap(
            body,
            FontStyle::Normal,
            size,
            self.config.page.content_width(),
        );
        let height = REMEDY_LINE_STEP + lines.len() as f32 * REMEDY_LINE_STEP;
        self.keep_together(height, self.config.thresholds.remedy_entry, "remedy entry")?;

        self.write(x, title, FontStyle::Bold, size, Tone::Remedy)?;
        self.cursor.advance(REMEDY_LINE_STEP);

        self.engine.set_font(FontStyle::Normal, size);
        self.engine.set_text_color(Tone::Body.text_color());
        let top = self.cursor.y();
        for (i, line) in lines.iter().enumerate() {
            if !line.is_empty() {
                self.engine
                    .text(x, top + i as f32 * REMEDY_LINE_STEP, line)?;
            }
        }
        self.cursor
            .advance(lines.len() as f32 * REMEDY_LINE_STEP + 8.0);
        Ok(())
    }

    fn planet_remedies(&mut self, remedies: &[PlanetRemedy]) -> Result<(), ExportError> {
        let tier = RemedyTier::Planetary;
        self.guard(self.config.thresholds.planet_remedies, tier.heading())?;
        self.subheading(tier.heading())?;

        if remedies.is_empty() {
            self.write(
                self.margin_left(),
                tier.empty_message(),
                FontStyle::Normal,
                10.0,
                Tone::AllClear,
            )?;
            self.cursor.advance(15.0);
            return Ok(());
        }

        let mut table = Table::new(TableTheme::Striped)
            .head(["No.", "Planet", "Remedy / Action"])
            .head_styles(CellStyle {
                font_size: Some(10.0),
                ..Self::accent_head()
            })
            .styles(CellStyle {
                font_size: Some(9.0),
                ..CellStyle::default()
            })
            .padding(5.0)
            .columns(vec![
                Column {
                    width: Some(20.0),
                    style: CellStyle {
                        halign: Some(Align::Center),
                        font_style: Some(FontStyle::Bold),
                        text_color: Some(Tone::Accent.text_color()),
                        ..CellStyle::default()
                    },
                },
                Column {
                    width: Some(35.0),
                    style: CellStyle {
                        font_style: Some(FontStyle::Bold),
                        ..CellStyle::default()
                    },
                },
                Column::default(),
            ]);
        for item in remedies {
            let actions = match item.remedies.as_slice() {
                [single] => single.clone(),
                many => many
                    .iter()
                    .map(|r| format!("• {}", r))
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            table = table.row([item.digit.to_string(), item.planet.clone(), actions]);
        }
        self.render_table(&table, 15.0)
    }

    fn luck(&mut self, model: &ReportDataModel) -> Result<(), ExportError> {
        let factors = &model.luck_factors;
        if factors.is_empty() {
            debug!("no luck factors, section skipped");
            return Ok(());
        }
        self.guard(self.config.thresholds.luck, "luck factors")?;
        self.heading(
            &format!("Luck Factor - Next {} Years", factors.len()),
            10.0,
        )?;

        let mut table = Table::new(TableTheme::Striped)
            .head(["Year", "Date", "PY, D", "Luck Factor"])
            .head_styles(Self::accent_head());
        for item in factors {
            table = table.row([
                item.year.to_string(),
                item.date_label(),
                item.combination.clone(),
                item.luck_factor.clone(),
            ]);
        }
        self.render_table(&table, 15.0)
    }

    fn name(&mut self, analysis: &NameAnalysis) -> Result<(), ExportError> {
        self.guard(self.config.thresholds.name, "name analysis")?;
        self.heading("Name Numerology Analysis", 12.0)?;

        let x = self.margin_left();
        let totals = [
            (
                format!(
                    "First Name: {} = {}",
                    analysis.first_name, analysis.first_name_value
                ),
                8.0,
            ),
            (
                format!(
                    "Full Name: {} = {}",
                    analysis.full_name, analysis.full_name_value
                ),
                12.0,
            ),
        ];
        for (line, gap) in totals {
            self.write(x, &line, FontStyle::Normal, 11.0, Tone::Body)?;
            self.cursor.advance(gap);
        }

        for outcome in [RuleOutcome::Followed, RuleOutcome::Contradicted] {
            let rules = analysis.rules(outcome);
            if rules.is_empty() {
                debug!("no {:?} rules, table skipped", outcome);
                continue;
            }
            self.guard(self.config.thresholds.rules, outcome.heading())?;
            self.write(x, outcome.heading(), FontStyle::Bold, 12.0, theme::rule_tone(outcome))?;
            self.cursor.advance(8.0);

            let left = x + 5.0;
            let width = 165.0;
            let mut table = Table::new(TableTheme::Plain)
                .styles(CellStyle {
                    font_size: Some(10.0),
                    text_color: Some(Tone::Body.text_color()),
                    ..CellStyle::default()
                })
                .columns(vec![Column {
                    width: Some(width),
                    ..Column::default()
                }])
                .padding(2.0)
                .margins(left, (self.config.page.width - left - width).max(0.0));
            for rule in rules {
                table = table.row([rule.description.as_str()]);
            }

            let end = TableLayout::new(self.fonts).render_with(
                &table,
                &mut *self.engine,
                &mut self.cursor,
                |drawn: &DrawnCell, engine: &mut dyn DocumentEngine| {
                    if drawn.section != TableSection::Body || drawn.column != 0 {
                        return Ok(());
                    }
                    engine.set_font(FontStyle::Normal, 10.0);
                    engine.set_text_color(Tone::Body.text_color());
                    engine.text(drawn.rect.x - 5.0, drawn.rect.y + 4.0, "-")
                },
            )?;
            self.cursor.resume_at(end + 10.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{DrawOp, RecordingEngine};
    use crate::model::{fixtures, LoshuLines};
    use crate::render::{project, MountPoint, ViewOp};

    fn composed(model: &ReportDataModel) -> (RecordingEngine, usize) {
        let mut engine = RecordingEngine::new();
        let pages = compose(model, &mut engine, &ReportConfig::default()).unwrap();
        (engine, pages)
    }

    fn position(engine: &RecordingEngine, text: &str) -> usize {
        engine
            .texts()
            .iter()
            .position(|t| t.text == text)
            .unwrap_or_else(|| panic!("{:?} was not drawn", text))
    }

    #[test]
    fn test_section_order() {
        let (engine, _) = composed(&fixtures::model());
        let headings = [
            REPORT_TITLE,
            "Name: Asha Rao",
            "Your Personalized Loshu Grid",
            "Your Numbers",
            "Numbers Present in Your Life:",
            "Number Compatibility",
            "Number Summary",
            "Complete Lines in Your Loshu Grid",
            "Remedies for Missing Numbers",
            "Part 2: Yantra-Based Remedies",
            "Part 3: Planet-Based Remedies (Tabular Format)",
            "Luck Factor - Next 3 Years",
            "Name Numerology Analysis",
            "Rules Followed:",
            "Rules Contradicted:",
        ];
        let positions: Vec<_> = headings.iter().map(|h| position(&engine, h)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
    }

    #[test]
    fn test_identity_fields() {
        let (engine, _) = composed(&fixtures::model());
        assert!(engine.find_text("Date of Birth: May 14, 1992").is_some());
        assert!(engine.find_text("Gender: Female").is_some());
        let title = engine.find_text(REPORT_TITLE).unwrap();
        assert_eq!(title.y, 20.0);
        assert_eq!(title.size, 20.0);
    }

    #[test]
    fn test_composition_is_deterministic() {
        let (first, first_pages) = composed(&fixtures::model());
        let (second, second_pages) = composed(&fixtures::model());
        assert_eq!(first.ops(), second.ops());
        assert_eq!(first_pages, second_pages);
    }

    #[test]
    fn test_page_count_matches_engine() {
        let (engine, pages) = composed(&fixtures::model());
        assert!(pages >= 2);
        assert_eq!(pages, engine.page_count());
        let breaks = engine
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::AddPage))
            .count();
        assert_eq!(breaks + 1, pages);
    }

    #[test]
    fn test_nothing_drawn_below_bottom_margin() {
        let (engine, _) = composed(&fixtures::model());
        let bottom = ReportConfig::default().page.bottom_limit();
        for text in engine.texts() {
            assert!(text.y <= bottom, "{:?} at y {}", text.text, text.y);
        }
    }

    #[test]
    fn test_nothing_drawn_past_right_margin() {
        let page = ReportConfig::default().page;
        let right = page.width - page.margin_right;
        let (engine, _) = composed(&fixtures::model());
        let mut rects = 0;
        for op in engine.ops() {
            if let DrawOp::Rect { x, width, .. } = op {
                rects += 1;
                assert!(x + width <= right + 1e-3, "rect ends at {}", x + width);
            }
        }
        assert!(rects > 0);
        for text in engine.texts() {
            assert!(text.x < right, "{:?} starts at x {}", text.text, text.x);
        }
    }

    #[test]
    fn test_long_rule_description_stays_on_pages() {
        let long = "Consider adding a letter to the surname. ".repeat(400);
        let json = fixtures::RESPONSE_JSON.replace(
            "Consider adding a letter to the surname.",
            long.trim_end(),
        );
        let model = ReportDataModel::from_response(&json).unwrap();
        let (engine, pages) = composed(&model);
        let (_, short_pages) = composed(&fixtures::model());

        let bottom = ReportConfig::default().page.bottom_limit();
        for text in engine.texts() {
            assert!(text.y <= bottom, "{:?} at y {}", text.text, text.y);
        }
        assert!(pages > short_pages);
        // One marker per rule, not per page the rule spans
        assert_eq!(engine.texts().iter().filter(|t| t.text == "-").count(), 3);
    }

    #[test]
    fn test_grid_markers_drawn_inside_cells() {
        let (engine, _) = composed(&fixtures::model());
        let markers: Vec<_> = engine.texts().iter().filter(|t| t.text == "×2").collect();
        assert_eq!(markers.len(), 4);
        for marker in markers {
            assert_eq!(marker.size, 7.0);
            assert!(marker.x > 75.0 && marker.x < 135.0);
        }
    }

    #[test]
    fn test_grid_marker_for_missing_cell() {
        let json = fixtures::RESPONSE_JSON.replace(
            r#"{"value": 3, "present": false, "count": 0}"#,
            r#"{"value": 3, "present": false, "count": 2}"#,
        );
        let model = ReportDataModel::from_response(&json).unwrap();
        let (engine, _) = composed(&model);
        let markers = engine.texts().iter().filter(|t| t.text == "×2").count();
        assert_eq!(markers, 5);
    }

    #[test]
    fn test_sparse_model_skips_optional_sections() {
        let (engine, pages) = composed(&fixtures::sparse_model());
        // The summary leaves the cursor past the remedies threshold
        assert_eq!(pages, 2);
        for absent in [
            "Number Compatibility",
            "Complete Lines in Your Loshu Grid",
            "Name Numerology Analysis",
            "Rules Followed:",
        ] {
            assert!(engine.find_text(absent).is_none(), "{} was drawn", absent);
        }
        assert!(!engine.texts().iter().any(|t| t.text.starts_with("Luck Factor")));
        assert!(engine.find_text(LoshuLines::EMPTY_MESSAGE).is_none());
        for tier in [RemedyTier::Missing, RemedyTier::Yantra, RemedyTier::Planetary] {
            let message = engine.find_text(tier.empty_message()).unwrap();
            assert_eq!(message.color, Tone::AllClear.text_color());
        }
        assert_eq!(engine.find_text("None").map(|t| t.color), Some(Tone::Body.text_color()));
    }

    #[test]
    fn test_remedy_titles() {
        let (engine, _) = composed(&fixtures::model());
        let first = engine.find_text("IF 3 IS MISSING").unwrap();
        assert_eq!(first.style, FontStyle::Bold);
        assert_eq!(first.color, Tone::Remedy.text_color());
        assert!(engine.find_text("IF 8 IS MISSING").is_some());
        assert!(engine.find_text("IF IF 8 IS MISSING").is_none());
        assert!(engine.find_text("INSTALL A SHUKRA YANTRA").is_some());
        assert!(engine
            .find_text("Condition: 6 and 7 are both missing")
            .is_some());
    }

    #[test]
    fn test_long_remedy_body_wraps_to_content_width() {
        let (engine, _) = composed(&fixtures::model());
        let fonts = FontLibrary::new();
        let title = position(&engine, "IF 3 IS MISSING");
        let next = position(&engine, "IF 8 IS MISSING");
        let body = &engine.texts()[title + 1..next];
        assert!(body.len() > 1);
        for line in body {
            assert!(fonts.text_width(&line.text, FontStyle::Normal, 10.0) <= 170.0);
        }
        assert!((body[1].y - body[0].y - REMEDY_LINE_STEP).abs() < 1e-3);
    }

    #[test]
    fn test_remedy_entry_kept_together() {
        let mut model = fixtures::model();
        let entry = model.remedies.missing[0].clone();
        model.remedies.missing = vec![entry; 12];
        let (engine, _) = composed(&model);
        let texts = engine.texts();
        for (i, text) in texts.iter().enumerate() {
            if text.text == "IF 3 IS MISSING" {
                assert_eq!(texts[i + 1].page, text.page);
            }
        }
    }

    #[test]
    fn test_planet_remedies_listed() {
        let (engine, _) = composed(&fixtures::model());
        assert!(engine.find_text("• Wear yellow on Thursdays").is_some());
        assert!(engine.find_text("• Donate turmeric").is_some());
        assert!(engine.find_text("Use a silver glass for water").is_some());
    }

    #[test]
    fn test_rule_rows_have_markers() {
        let (engine, _) = composed(&fixtures::model());
        let markers = engine.texts().iter().filter(|t| t.text == "-").count();
        assert_eq!(markers, 3);
        let heading = engine.find_text("Rules Contradicted:").unwrap();
        assert_eq!(heading.color, Tone::Negative.text_color());
    }

    #[test]
    fn test_engine_failure_propagates() {
        let mut engine = RecordingEngine::failing_after(5);
        let err = compose(&fixtures::model(), &mut engine, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ExportError::Engine(_)));
    }

    #[test]
    fn test_low_threshold_forces_breaks() {
        let mut config = ReportConfig::default();
        config.thresholds.summary = 21.0;
        config.thresholds.name = 21.0;
        let mut engine = RecordingEngine::new();
        compose(&fixtures::model(), &mut engine, &config).unwrap();
        let summary = engine.find_text("Number Summary").unwrap();
        assert_eq!(summary.y, config.page.margin_top);
        let name = engine.find_text("Name Numerology Analysis").unwrap();
        assert_eq!(name.y, config.page.margin_top);
        assert!(name.page > summary.page);
    }

    #[test]
    fn test_colours_agree_with_screen() {
        let model = fixtures::model();
        let (engine, _) = composed(&model);
        let frame = project(&model);
        let first_node = |mount: MountPoint| {
            frame.ops_for(mount).find_map(|op| match op {
                ViewOp::Replace { children, .. } => children.first().cloned(),
                _ => None,
            })
        };

        // Grid: digit 4 is present, digit 3 missing
        let tiles = frame
            .ops_for(MountPoint::LoshuGrid)
            .find_map(|op| match op {
                ViewOp::Replace { children, .. } => Some(children.clone()),
                _ => None,
            })
            .unwrap();
        for tile in &tiles {
            let digit = tile.text.clone().unwrap();
            let drawn = engine
                .texts()
                .iter()
                .find(|t| t.text == digit && t.size == 18.0)
                .unwrap();
            assert_eq!(Some(drawn.color), tile.tone.map(|t| t.text_color()));
        }

        let pairs = [
            ("Friends:", MountPoint::Friends(NumberKind::Conductor)),
            ("Non-Friends:", MountPoint::NonFriends(NumberKind::Conductor)),
            ("Neutral:", MountPoint::Neutral(NumberKind::Conductor)),
            ("Lucky Numbers:", MountPoint::LuckyNumbersSummary),
            ("Bad Numbers:", MountPoint::BadNumbersSummary),
            ("Missing Numbers:", MountPoint::MissingNumbersList),
            ("Rules Followed:", MountPoint::Rules(RuleOutcome::Followed)),
            ("Rules Contradicted:", MountPoint::Rules(RuleOutcome::Contradicted)),
        ];
        for (label, mount) in pairs {
            let drawn = engine.find_text(label).unwrap();
            let node = first_node(mount).unwrap();
            assert_eq!(Some(drawn.color), node.tone.map(|t| t.text_color()), "{}", label);
        }
    }
}
