use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use vcodegen_core::{Error, Module, ModuleScanner};

pub struct TestHarness {
    fixtures_root: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            fixtures_root: default_fixtures_root(),
        }
    }

    pub fn fixtures_root(&self) -> &Path {
        &self.fixtures_root
    }

    pub fn fixture_path(&self, relative: &str) -> PathBuf {
        self.fixtures_root.join(relative)
    }

    pub fn read_fixture(&self, relative: &str) -> String {
        let path = self.fixture_path(relative);
        fs::read_to_string(&path).unwrap_or_else(|err| {
            panic!("Failed to read fixture {}: {}", path.display(), err);
        })
    }

    pub fn scan_fixture(&self, relative: &str) -> Result<Option<Module>, Error> {
        let content = self.read_fixture(relative);
        ModuleScanner::new(Cursor::new(content)).scan()
    }

    #[allow(dead_code)]
    pub fn scan_fixture_ok(&self, relative: &str) -> Module {
        match self.scan_fixture(relative) {
            Ok(Some(module)) => module,
            Ok(None) => panic!("No module found in {}", relative),
            Err(err) => panic!("Failed to scan {}: {}", relative, err),
        }
    }

    #[allow(dead_code)]
    pub fn scan_fixture_err(&self, relative: &str) -> Error {
        match self.scan_fixture(relative) {
            Err(err) => err,
            Ok(result) => panic!("Expected {} to fail scanning, got {:?}", relative, result),
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test_files")
}

/// `.v` and `.sv` files directly under `relative_dir`, sorted.
#[allow(dead_code)]
pub fn iter_hdl_files(relative_dir: &str) -> Vec<PathBuf> {
    let root = default_fixtures_root().join(relative_dir);
    if !root.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = fs::read_dir(&root)
        .unwrap_or_else(|err| panic!("Failed to read directory {}: {}", root.display(), err))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("v") | Some("sv") => Some(path),
                _ => None,
            }
        })
        .collect();
    files.sort();
    files
}

#[allow(dead_code)]
pub fn for_each_hdl_file<F>(relative_dir: &str, mut visit: F)
where
    F: FnMut(&Path, Result<Option<Module>, Error>),
{
    let harness = TestHarness::default();
    let fixtures_root = harness.fixtures_root().to_path_buf();

    for path in iter_hdl_files(relative_dir) {
        let relative = path
            .strip_prefix(&fixtures_root)
            .unwrap_or_else(|_| path.as_path());
        let relative_str = relative.to_string_lossy().replace('\\', "/");
        let result = harness.scan_fixture(&relative_str);
        visit(&path, result);
    }
}

/// Names of the ports of `module` in emission order.
#[allow(dead_code)]
pub fn port_names(module: &Module) -> Vec<String> {
    module
        .ports()
        .iter()
        .map(|port| port.identifier().to_string())
        .collect()
}
