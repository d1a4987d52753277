use std::fmt;

/// Linear run states of the migration pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    PrepareImageDir,
    ParseExport,
    FetchImages,
    ExtractAndWrite,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::PrepareImageDir => "prepare-image-dir",
            Stage::ParseExport => "parse-export",
            Stage::FetchImages => "fetch-images",
            Stage::ExtractAndWrite => "extract-and-write",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}
