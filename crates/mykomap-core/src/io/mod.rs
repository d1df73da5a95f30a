pub mod archive;
pub mod crop;
pub mod image_io;
pub mod publish;
pub mod store;

pub use archive::{FrameArchive, IngestOutcome};
pub use crop::{crop_frame, crop_image_file, CropInsets};
pub use image_io::{decode_frame, encode_png, load_frame, save_png};
pub use publish::{ArtifactPublisher, CurrentArtifacts, PUBLISHED_KINDS};
pub use store::{write_atomic, ArtifactKind, ArtifactStore, FsStore, MemoryStore};
