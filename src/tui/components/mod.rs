// Components module - UI building blocks
//
// Chrome drawn every frame:
// - Title bar: app name, item count, FPS
// - Status bar: row counts, scroll offset, published range
// - Logs panel: system log tail (toggled with `l`)
//
// Body:
// - Item list: the virtualized rows
// - Detail panel: the selected record

pub mod detail_panel;
pub mod item_list;
pub mod logs_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use detail_panel::DetailPanel;
pub use logs_panel::LogsPanel;
pub use toast::Toast;
