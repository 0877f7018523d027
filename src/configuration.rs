use std::net::SocketAddr;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "todos.sqlite";

#[derive(Clone, Debug)]
pub struct Configuration {
    pub data_dir: PathBuf,
    pub api_listen: SocketAddr,
    pub log_file: Option<PathBuf>,
    pub reset: bool,
}

impl Configuration {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}
