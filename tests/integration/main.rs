mod follow_mode;
mod helpers;
mod transcript_files;
mod window_paging;
