mod context;
mod date_format;
mod helpers;
mod renderer;

pub use context::{
    group_by_date, RenderContext, RenderOptions, DATE_FORMAT_DEFAULT, TITLE_DEFAULT,
};
pub use date_format::DateFormat;
pub use helpers::{format_date, has_content, is_blank, join, CustomHelper, Helper, Helpers};
pub use renderer::{Renderer, DEFAULT_TEMPLATE};
