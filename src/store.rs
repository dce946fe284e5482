//! Plain text-file persistence for exported key material.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};
use crate::key::KeyPair;
use crate::{pem, xml};

/// Writes exported key text to named files under a root directory.
///
/// Files are UTF-8 and silently overwrite existing content. There is no
/// encryption and no permission hardening; callers needing secure-at-rest
/// storage must wrap this. Concurrent writers to the same filename are not
/// serialized.
#[derive(Clone, Debug)]
pub struct KeyFileStore {
    root: PathBuf,
}

/// Paths written by [`KeyFileStore::save_key_pair`].
#[derive(Clone, Debug)]
pub struct SavedKeyPair {
    /// PKCS#8 PEM private key file.
    pub private_pem: PathBuf,
    /// SubjectPublicKeyInfo PEM public key file.
    pub public_pem: PathBuf,
    /// Private `<RSAKeyValue>` XML file.
    pub private_xml: PathBuf,
    /// Public `<RSAKeyValue>` XML file.
    pub public_xml: PathBuf,
}

impl KeyFileStore {
    /// Creates a store rooted at `root`. The directory must exist.
    pub fn new(root: impl Into<PathBuf>) -> KeyFileStore {
        KeyFileStore { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `contents` to `file_name` under the store root, overwriting
    /// any existing file, and returns the full path.
    pub fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(file_name);
        fs::write(&path, contents).map_err(Error::FileWrite)?;
        Ok(path)
    }

    /// Exports `pair` in all four on-disk forms, named
    /// `{name}_{private,public}_key.{pem,xml}`.
    pub fn save_key_pair(&self, name: &str, pair: &KeyPair) -> Result<SavedKeyPair> {
        let private_pem = pem::encode_private_key(pair.private_key())?;
        let public_pem = pem::encode_public_key(pair.public_key())?;
        let private_xml = xml::encode_private_key(pair.private_key());
        let public_xml = xml::encode_public_key(pair.public_key());

        Ok(SavedKeyPair {
            private_pem: self.save(&format!("{name}_private_key.pem"), &private_pem)?,
            public_pem: self.save(&format!("{name}_public_key.pem"), &public_pem)?,
            private_xml: self.save(&format!("{name}_private_key.xml"), &private_xml)?,
            public_xml: self.save(&format!("{name}_public_key.xml"), &public_xml)?,
        })
    }
}
