pub mod fs_append;
