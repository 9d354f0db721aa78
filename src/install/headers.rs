// src/install/headers.rs
// =============================================================================
// The fixed list of headers we download, and where each one goes.
//
// Layout produced under the include directory:
//   GL/glcorearb.h
//   GL/wglext.h
//   KHR/khrplatform.h
//
// This list is static configuration: it never changes at runtime, so it
// lives in a const array instead of a config file.
// =============================================================================

use std::path::{Path, PathBuf};

// One header to download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpec {
    /// Where to download the header from
    pub url: &'static str,
    /// Subdirectory of the include directory (e.g. "GL")
    pub subdir: &'static str,
    /// File name inside the subdirectory
    pub filename: &'static str,
}

impl HeaderSpec {
    /// Full path of this header under the given include directory
    pub fn destination(&self, root: &Path) -> PathBuf {
        root.join(self.subdir).join(self.filename)
    }
}

// Subdirectories created before any download, in this order
pub const SUBDIRECTORIES: [&str; 2] = ["GL", "KHR"];

// Headers fetched in this order
pub const KHRONOS_HEADERS: [HeaderSpec; 3] = [
    HeaderSpec {
        url: "https://www.khronos.org/registry/OpenGL/api/GL/glcorearb.h",
        subdir: "GL",
        filename: "glcorearb.h",
    },
    HeaderSpec {
        url: "https://www.khronos.org/registry/OpenGL/api/GL/wglext.h",
        subdir: "GL",
        filename: "wglext.h",
    },
    HeaderSpec {
        url: "https://www.khronos.org/registry/EGL/api/KHR/khrplatform.h",
        subdir: "KHR",
        filename: "khrplatform.h",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_order() {
        let names: Vec<_> = KHRONOS_HEADERS.iter().map(|h| h.filename).collect();
        assert_eq!(names, ["glcorearb.h", "wglext.h", "khrplatform.h"]);
    }

    #[test]
    fn test_every_header_lands_in_a_created_subdirectory() {
        for header in &KHRONOS_HEADERS {
            assert!(SUBDIRECTORIES.contains(&header.subdir), "{}", header.url);
            // The URL path ends in <subdir>/<filename>
            let suffix = format!("/{}/{}", header.subdir, header.filename);
            assert!(header.url.ends_with(&suffix), "{}", header.url);
        }
    }

    #[test]
    fn test_destination() {
        let root = Path::new("/tmp/include");
        assert_eq!(
            KHRONOS_HEADERS[2].destination(root),
            PathBuf::from("/tmp/include/KHR/khrplatform.h")
        );
    }
}
