//! Writes a file manifest to disk or into a zip archive

use crate::manifest::{FileManifest, SCAFFOLD_DIRS};
use anyhow::{Context, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use tokio::fs;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write every manifest entry below `target_dir`, returning the written paths
///
/// Existing files are overwritten.
pub async fn write_manifest(manifest: &FileManifest, target_dir: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    for dir in SCAFFOLD_DIRS {
        let path = target_dir.join(dir);
        fs::create_dir_all(&path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }

    let mut written = Vec::with_capacity(manifest.len());

    for entry in manifest {
        let target_path = target_dir.join(&entry.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = entry
            .content
            .render()
            .with_context(|| format!("Failed to render {}", entry.path))?;
        fs::write(&target_path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        tracing::debug!(path = %entry.path, "wrote file");
        written.push(entry.path.clone());
    }

    Ok(written)
}

/// Build a deflated zip holding every entry in manifest order
pub fn archive_manifest(manifest: &FileManifest) -> Result<Vec<u8>> {
    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for dir in SCAFFOLD_DIRS {
            zip.add_directory(format!("{}/", dir), options)
                .with_context(|| format!("Failed to add directory '{}' to archive", dir))?;
        }

        for entry in manifest {
            zip.start_file(entry.path.as_str(), options)
                .with_context(|| format!("Failed to add '{}' to archive", entry.path))?;
            let content = entry
                .content
                .render()
                .with_context(|| format!("Failed to render {}", entry.path))?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish().context("Failed to finish archive")?;
    }

    Ok(zip_buffer)
}

/// Write the archive for `manifest` to `path`
pub async fn write_archive(manifest: &FileManifest, path: &Path) -> Result<usize> {
    let bytes = archive_manifest(manifest)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write archive: {}", path.display()))?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample() -> FileManifest {
        let mut manifest = FileManifest::new();
        manifest
            .push_structured("package.json", json!({ "name": "cypress-project" }))
            .unwrap();
        manifest
            .push_text(".github/workflows/runner.yml", "name: Cypress Tests\n".to_string())
            .unwrap();
        manifest
            .push_text("cypress/support/e2e.js", "import './commands';\n".to_string())
            .unwrap();
        manifest
    }

    #[tokio::test]
    async fn test_write_manifest_creates_files_and_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let written = write_manifest(&sample(), tmp.path()).await.unwrap();

        assert_eq!(
            written,
            vec![
                "package.json",
                ".github/workflows/runner.yml",
                "cypress/support/e2e.js"
            ]
        );
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("package.json")).unwrap(),
            "{\n  \"name\": \"cypress-project\"\n}\n"
        );
        assert!(tmp.path().join(".github/workflows/runner.yml").is_file());
        for dir in SCAFFOLD_DIRS {
            assert!(tmp.path().join(dir).is_dir(), "{} not created", dir);
        }
    }

    #[tokio::test]
    async fn test_write_manifest_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("package.json"), "old").unwrap();
        write_manifest(&sample(), tmp.path()).await.unwrap();
        let content = std::fs::read_to_string(tmp.path().join("package.json")).unwrap();
        assert!(content.contains("cypress-project"));
    }

    #[test]
    fn test_archive_keeps_manifest_order_and_content() {
        let bytes = archive_manifest(&sample()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let files: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .filter(|name| !name.ends_with('/'))
            .collect();
        assert_eq!(
            files,
            vec![
                "package.json",
                ".github/workflows/runner.yml",
                "cypress/support/e2e.js"
            ]
        );

        let mut body = String::new();
        archive
            .by_name("cypress/support/e2e.js")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert_eq!(body, "import './commands';\n");
    }

    #[tokio::test]
    async fn test_write_archive_to_nested_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out/project.zip");
        let size = write_archive(&sample(), &path).await.unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, size);
    }
}
