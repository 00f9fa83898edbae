//! Detail panel component
//!
//! Shows the full record of the selected row. The selection controller owns
//! the panel and pushes records into it through `DetailView`; rendering
//! only reads what was last pushed.

use crate::catalog::ItemRecord;
use crate::list::DetailView;
use crate::tui::traits::{Component, ComponentId, Copyable, RenderContext};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Default)]
pub struct DetailPanel {
    record: Option<ItemRecord>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn record(&self) -> Option<&ItemRecord> {
        self.record.as_ref()
    }

    /// Text lines for the current record
    pub fn lines(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let Some(record) = &self.record else {
            return vec![Line::from(Span::styled(
                "Nothing selected",
                Style::default().fg(theme.muted),
            ))];
        };

        vec![
            Line::from(vec![
                Span::raw(format!("{} ", ctx.icons.resolve(record.icon_index))),
                Span::styled(
                    record.name.clone(),
                    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Stat  ", Style::default().fg(theme.muted)),
                Span::styled(record.stat.to_string(), Style::default().fg(theme.stat)),
            ]),
            Line::default(),
            Line::from(Span::styled(
                record.description.clone(),
                Style::default().fg(theme.fg),
            )),
        ]
    }
}

impl DetailView for DetailPanel {
    fn display(&mut self, record: &ItemRecord) {
        self.record = Some(record.clone());
    }
}

impl Component for DetailPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Detail
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(ctx.theme.border_style())
            .title(" Detail ");

        let paragraph = Paragraph::new(self.lines(ctx))
            .style(ctx.theme.base_style())
            .wrap(Wrap { trim: true })
            .block(block);

        f.render_widget(paragraph, area);
    }
}

impl Copyable for DetailPanel {
    fn copy_text(&self) -> Option<String> {
        self.record.as_ref().map(|record| {
            format!(
                "{}\nStat: {}\n\n{}",
                record.name, record.stat, record.description
            )
        })
    }

    fn copy_description(&self) -> String {
        match &self.record {
            Some(record) => format!("'{}'", record.name),
            None => self.id().label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::icons::IconLookup;
    use crate::catalog::tests::record;
    use crate::tui::theme::Theme;

    #[test]
    fn display_replaces_record() {
        let mut panel = DetailPanel::new();
        assert!(panel.copy_text().is_none());

        panel.display(&record("Lantern", 2));
        panel.display(&record("Gem Pouch", 45));

        assert_eq!(panel.record().map(|r| r.name.as_str()), Some("Gem Pouch"));
        assert_eq!(
            panel.copy_text().as_deref(),
            Some("Gem Pouch\nStat: 45\n\nGem Pouch description")
        );
        assert_eq!(panel.copy_description(), "'Gem Pouch'");
    }

    #[test]
    fn lines_show_icon_name_and_stat() {
        let theme = Theme::default();
        let icons = IconLookup::new(vec!["*".to_string()]);
        let ctx = RenderContext::new(&theme, &icons);

        let mut panel = DetailPanel::new();
        assert_eq!(panel.lines(&ctx)[0].to_string(), "Nothing selected");

        panel.display(&record("Lantern", 2));
        let lines = panel.lines(&ctx);
        assert_eq!(lines[0].to_string(), "* Lantern");
        assert_eq!(lines[1].to_string(), "Stat  2");
        assert_eq!(lines[3].to_string(), "Lantern description");
    }
}
