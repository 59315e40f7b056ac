pub mod clip_list;
pub mod header;
