pub mod video_access;
