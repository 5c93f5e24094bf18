//! MessagePack implementation of the agent repository.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedQAgent};

/// MessagePack-based agent repository.
///
/// Missing parent directories are created on save.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &SavedQAgent, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create directory {parent:?}"),
                source,
            })?;
        }
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, agent).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize agent to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("write file {path:?}"),
            source,
        })?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedQAgent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
