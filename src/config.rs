use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const PRIMARY_WORKBOOK: &str = "Dashboard data.xlsx";

/// Where the dashboard finds its files and listens
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    /// Directory holding the primary and import workbooks
    pub data_dir: PathBuf,
    /// Stylesheet and images, served under `/static`
    pub static_dir: PathBuf,
    pub bind_addr: String,
    /// File name of the primary workbook inside `data_dir`
    pub primary_workbook: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            primary_workbook: PRIMARY_WORKBOOK.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Reads `[data_dir] [bind_addr]` from command-line arguments
    ///
    /// `args[0]` is the program name. Missing or empty arguments keep
    /// their defaults.
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Self::default();

        if let Some(dir) = args.get(1).filter(|a| !a.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = args.get(2).filter(|a| !a.is_empty()) {
            config.bind_addr = addr.clone();
        }

        config
    }
}
