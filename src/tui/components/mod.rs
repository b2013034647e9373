pub mod format_list;
pub mod search_bar;
pub mod status_bar;
pub mod theme;
pub mod video_info;
pub mod widgets;
