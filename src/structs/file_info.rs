/// One admitted source file. `path` is relative to the analyzed root so it
/// can be reported verbatim.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: String,
    pub content: String,
}
