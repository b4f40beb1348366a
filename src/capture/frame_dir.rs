use super::{Frame, FrameDecoder, FrameSource};
use crate::error::{Result, ShotError};
use image::RgbImage;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Decodes frame files with the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl FrameDecoder for ImageDecoder {
    fn decode(&self, path: &Path) -> Result<RgbImage> {
        let image = image::open(path).map_err(|source| ShotError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(image.into_rgb8())
    }
}

/// Frame index encoded in a file name, e.g. `00042.jpg` -> 42.
pub fn parse_frame_index(path: &Path) -> Result<u64> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|stem| stem.parse::<u64>().ok())
        .ok_or_else(|| ShotError::FrameName(path.to_path_buf()))
}

/// A directory holding one image file per frame.
///
/// Files are visited in file-name order, which must agree with ascending
/// frame index (zero-padded names).
pub struct FrameDirectory<D: FrameDecoder = ImageDecoder> {
    frames: Vec<(u64, PathBuf)>,
    decoder: D,
    next: usize,
}

impl FrameDirectory<ImageDecoder> {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::with_decoder(dir, ImageDecoder)
    }
}

impl<D: FrameDecoder> FrameDirectory<D> {
    pub fn with_decoder<P: AsRef<Path>>(dir: P, decoder: D) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ShotError::InputPath(dir.to_path_buf()));
        }

        tracing::info!("Scanning frames in {}", dir.display());

        let mut frames: Vec<(u64, PathBuf)> = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            let index = parse_frame_index(&path)?;
            if let Some(&(previous, _)) = frames.last() {
                if index <= previous {
                    return Err(ShotError::FrameOrder { previous, index });
                }
            }
            frames.push((index, path));
        }

        if frames.is_empty() {
            return Err(ShotError::NoFrames(dir.to_path_buf()));
        }

        tracing::info!("Found {} frames", frames.len());

        Ok(Self {
            frames,
            decoder,
            next: 0,
        })
    }

    /// Frame indices and paths in processing order
    pub fn frames(&self) -> &[(u64, PathBuf)] {
        &self.frames
    }
}

impl<D: FrameDecoder> FrameSource for FrameDirectory<D> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some((index, path)) = self.frames.get(self.next) else {
            return Ok(None);
        };
        let image = self.decoder.decode(path)?;
        self.next += 1;
        Ok(Some(Frame {
            index: *index,
            image,
        }))
    }

    fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Decoder that never touches the file contents
    struct BlankDecoder;

    impl FrameDecoder for BlankDecoder {
        fn decode(&self, _path: &Path) -> Result<RgbImage> {
            Ok(RgbImage::new(2, 2))
        }
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"").unwrap();
    }

    #[test]
    fn test_parse_frame_index() {
        assert_eq!(parse_frame_index(Path::new("/frames/00042.jpg")).unwrap(), 42);
        assert_eq!(parse_frame_index(Path::new("00000.png")).unwrap(), 0);
        assert_eq!(parse_frame_index(Path::new("7")).unwrap(), 7);
        for bad in ["frame_01.jpg", "-1.jpg", ".jpg", "12a.png", "+3.jpg"] {
            assert!(
                matches!(parse_frame_index(Path::new(bad)), Err(ShotError::FrameName(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_frames_come_out_in_order() {
        let dir = TempDir::new().unwrap();
        for name in ["00002.jpg", "00000.jpg", "00001.jpg"] {
            touch(&dir, name);
        }
        fs::create_dir(dir.path().join("00003")).unwrap();

        let mut source = FrameDirectory::with_decoder(dir.path(), BlankDecoder).unwrap();
        assert_eq!(source.frame_count(), 3);

        let mut indices = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            indices.push(frame.index);
        }
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_unpadded_names() {
        let dir = TempDir::new().unwrap();
        for name in ["9.jpg", "10.jpg"] {
            touch(&dir, name);
        }
        let result = FrameDirectory::with_decoder(dir.path(), BlankDecoder);
        // "10.jpg" sorts before "9.jpg"
        assert!(matches!(
            result,
            Err(ShotError::FrameOrder { previous: 10, index: 9 })
        ));
    }

    #[test]
    fn test_rejects_non_numeric_names() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00000.jpg");
        touch(&dir, "notes.txt");
        let result = FrameDirectory::with_decoder(dir.path(), BlankDecoder);
        assert!(matches!(result, Err(ShotError::FrameName(_))));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = FrameDirectory::with_decoder(dir.path(), BlankDecoder);
        assert!(matches!(result, Err(ShotError::NoFrames(_))));
    }

    #[test]
    fn test_input_must_be_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "00000.jpg");
        let result = FrameDirectory::open(dir.path().join("00000.jpg"));
        assert!(matches!(result, Err(ShotError::InputPath(_))));
    }

    #[test]
    fn test_undecodable_frame() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("00000.png"), b"not a png").unwrap();
        let mut source = FrameDirectory::open(dir.path()).unwrap();
        match source.next_frame() {
            Err(ShotError::Decode { path, .. }) => assert!(path.ends_with("00000.png")),
            other => panic!("expected decode failure, got {:?}", other.map(|f| f.map(|f| f.index))),
        }
    }
}
