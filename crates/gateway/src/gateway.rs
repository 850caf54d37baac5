//! Public operation surface
//!
//! Every operation follows the same sequence: check the fixed-size buffer
//! contracts, wait for the engine, check the message against the slot
//! capacity, then under the engine lock copy inputs in, run exactly one
//! primitive, copy outputs out and scrub. Size violations are reported
//! before anything is loaded or locked.

use std::fmt;
use std::sync::Arc;

use edgate_api::error::validate;
use edgate_api::{ArtifactLoader, ArtifactLocation, Error, Result};
use edgate_common::SecretBuffer;
use edgate_params::{
    ED25519_DIGEST_SIZE, ED25519_PRIVATE_KEY_SIZE, ED25519_PUBLIC_KEY_SIZE, ED25519_SCALAR_SIZE,
    ED25519_SEED_SIZE, ED25519_SHARED_SECRET_SIZE, ED25519_SIGNATURE_SIZE,
};
use tracing::{debug, trace};

use crate::config::GatewayConfig;
use crate::layout::SlotKind;
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::session::Session;

// `sha512` borrows the signature slot for its output
const _: () = assert!(ED25519_DIGEST_SIZE == ED25519_SIGNATURE_SIZE);

/// Key pair with an owned, self-scrubbing private half
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: [u8; ED25519_PUBLIC_KEY_SIZE],
    pub private_key: SecretBuffer<ED25519_PRIVATE_KEY_SIZE>,
}

/// Gateway to one Ed25519 engine
///
/// Each gateway owns its own engine and lifecycle, so independent
/// instances can coexist in one process. The engine is brought up on first
/// use, or eagerly through [`Gateway::initialize`].
///
/// # Examples
///
/// ```
/// use edgate_engine::SoftwareLoader;
/// use edgate_gateway::Gateway;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> edgate_api::Result<()> {
/// let gateway = Gateway::new(SoftwareLoader::new());
///
/// let mut public_key = [0u8; 32];
/// let mut private_key = [0u8; 64];
/// gateway.create_key_pair(&mut public_key, &mut private_key, &[7u8; 32]).await?;
///
/// let mut signature = [0u8; 64];
/// gateway.sign(&mut signature, b"hello", &public_key, &private_key).await?;
/// assert!(gateway.verify(&signature, b"hello", &public_key).await?);
/// # Ok(())
/// # }
/// ```
pub struct Gateway {
    lifecycle: Lifecycle,
}

impl Gateway {
    /// Create a gateway with the default configuration
    pub fn new(loader: impl ArtifactLoader + 'static) -> Self {
        Self::with_config(loader, GatewayConfig::default())
    }

    /// Create a gateway with an explicit configuration
    pub fn with_config(loader: impl ArtifactLoader + 'static, config: GatewayConfig) -> Self {
        Self::with_shared_loader(Arc::new(loader), config)
    }

    /// Create a gateway over a loader shared with other owners
    pub fn with_shared_loader(loader: Arc<dyn ArtifactLoader>, config: GatewayConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(loader, config),
        }
    }

    /// Point the loader at a different artifact whose dependencies live
    /// alongside it
    ///
    /// # Errors
    ///
    /// [`Error::ConfigurationLocked`] once bring-up has started.
    pub fn set_artifact_path(&self, path: impl Into<String>) -> Result<()> {
        let artifact = ArtifactLocation::new(path);
        self.lifecycle.configure("set_artifact_path", |config| {
            config.artifact = artifact;
        })
    }

    /// Point the loader at a different artifact and dependency location
    ///
    /// # Errors
    ///
    /// [`Error::ConfigurationLocked`] once bring-up has started.
    pub fn set_artifact_location(
        &self,
        path: impl Into<String>,
        dependencies_path: impl Into<String>,
    ) -> Result<()> {
        let artifact = ArtifactLocation::with_dependencies(path, dependencies_path);
        self.lifecycle.configure("set_artifact_location", |config| {
            config.artifact = artifact;
        })
    }

    /// Stop zeroing secret slots and engine scratch after operations
    ///
    /// # Errors
    ///
    /// [`Error::ConfigurationLocked`] once bring-up has started.
    pub fn disable_private_key_trace_removal(&self) -> Result<()> {
        self.lifecycle
            .configure("disable_private_key_trace_removal", |config| {
                config.remove_private_key_traces = false;
            })
    }

    /// Current lifecycle phase
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Bring the engine up now instead of on first use
    pub async fn initialize(&self) -> Result<()> {
        self.lifecycle.ready().await.map(|_| ())
    }

    /// Largest message the engine accepts
    pub async fn message_capacity(&self) -> Result<usize> {
        let instance = self.lifecycle.ready().await?;
        Ok(instance.layout.message_capacity())
    }

    /// Derive a key pair from a 32-byte seed
    ///
    /// Identical seeds always yield identical key pairs.
    pub async fn create_key_pair(
        &self,
        out_public_key: &mut [u8],
        out_private_key: &mut [u8],
        seed: &[u8],
    ) -> Result<()> {
        validate::exact_length("out_public_key", out_public_key.len(), ED25519_PUBLIC_KEY_SIZE)?;
        validate::exact_length("out_private_key", out_private_key.len(), ED25519_PRIVATE_KEY_SIZE)?;
        validate::exact_length("seed", seed.len(), ED25519_SEED_SIZE)?;

        let instance = self.lifecycle.ready().await?;
        let mut session = Session::open(&instance);
        let seed_slot = session.secret(SlotKind::Seed);
        let private_slot = session.secret(SlotKind::PrivateKey);
        let public_slot = session.slot(SlotKind::PublicKey);

        session.write(seed_slot, seed);
        session.invoke(|engine| engine.create_keypair(public_slot, private_slot, seed_slot));
        session.read(public_slot, out_public_key);
        session.read(private_slot, out_private_key);

        trace!(operation = "create_key_pair", "completed");
        Ok(())
    }

    /// Owned-output form of [`Gateway::create_key_pair`]
    pub async fn generate_key_pair(&self, seed: &SecretBuffer<ED25519_SEED_SIZE>) -> Result<KeyPair> {
        let mut public_key = [0u8; ED25519_PUBLIC_KEY_SIZE];
        let mut private_key = SecretBuffer::zeroed();
        self.create_key_pair(&mut public_key, private_key.as_mut_slice(), seed.as_slice())
            .await?;
        Ok(KeyPair {
            public_key,
            private_key,
        })
    }

    /// Recompute the public key of a 64-byte private key
    pub async fn derive_public_key(&self, out_public_key: &mut [u8], private_key: &[u8]) -> Result<()> {
        validate::exact_length("out_public_key", out_public_key.len(), ED25519_PUBLIC_KEY_SIZE)?;
        validate::exact_length("private_key", private_key.len(), ED25519_PRIVATE_KEY_SIZE)?;

        let instance = self.lifecycle.ready().await?;
        let mut session = Session::open(&instance);
        let private_slot = session.secret(SlotKind::PrivateKey);
        let public_slot = session.slot(SlotKind::PublicKey);

        session.write(private_slot, private_key);
        session.invoke(|engine| engine.public_key_derive(public_slot, private_slot));
        session.read(public_slot, out_public_key);

        trace!(operation = "derive_public_key", "completed");
        Ok(())
    }

    /// Produce a deterministic detached signature
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBufferSize`] for `message` if it exceeds
    /// [`Gateway::message_capacity`]. The ceiling is imposed by the engine
    /// and cannot be raised.
    pub async fn sign(
        &self,
        out_signature: &mut [u8],
        message: &[u8],
        public_key: &[u8],
        private_key: &[u8],
    ) -> Result<()> {
        validate::exact_length("out_signature", out_signature.len(), ED25519_SIGNATURE_SIZE)?;
        validate::exact_length("public_key", public_key.len(), ED25519_PUBLIC_KEY_SIZE)?;
        validate::exact_length("private_key", private_key.len(), ED25519_PRIVATE_KEY_SIZE)?;

        let instance = self.lifecycle.ready().await?;
        let message_slot = instance.layout.message(message.len())?;
        let mut session = Session::open(&instance);
        let private_slot = session.secret(SlotKind::PrivateKey);
        let public_slot = session.slot(SlotKind::PublicKey);
        let signature_slot = session.slot(SlotKind::Signature);

        session.write(private_slot, private_key);
        session.write(public_slot, public_key);
        session.write(message_slot, message);
        session.invoke(|engine| engine.sign(signature_slot, message_slot, public_slot, private_slot));
        session.read(signature_slot, out_signature);

        debug!(operation = "sign", message_len = message.len(), "completed");
        Ok(())
    }

    /// Check a detached signature
    ///
    /// Returns `Ok(false)` for a well-formed but invalid signature; errors
    /// are reserved for contract violations.
    pub async fn verify(&self, signature: &[u8], message: &[u8], public_key: &[u8]) -> Result<bool> {
        validate::exact_length("signature", signature.len(), ED25519_SIGNATURE_SIZE)?;
        validate::exact_length("public_key", public_key.len(), ED25519_PUBLIC_KEY_SIZE)?;

        let instance = self.lifecycle.ready().await?;
        let message_slot = instance.layout.message(message.len())?;
        let mut session = Session::open(&instance);
        let signature_slot = session.slot(SlotKind::Signature);
        let public_slot = session.slot(SlotKind::PublicKey);

        session.write(signature_slot, signature);
        session.write(public_slot, public_key);
        session.write(message_slot, message);
        let valid = session.invoke(|engine| engine.verify(signature_slot, message_slot, public_slot));

        debug!(operation = "verify", message_len = message.len(), valid, "completed");
        Ok(valid)
    }

    /// Blind either or both halves of a key pair in place
    ///
    /// The top bit of `scalar` is ignored; callers comparing scalars must
    /// mask it themselves. Each present key is updated independently, so a
    /// public key can be blinded without its private key and vice versa.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalArgument`] if both keys are absent, or if the public
    /// key is not a valid curve point. In the latter case neither key is
    /// modified.
    pub async fn add_scalar(
        &self,
        public_key: Option<&mut [u8]>,
        private_key: Option<&mut [u8]>,
        scalar: &[u8],
    ) -> Result<()> {
        validate::check_argument(
            public_key.is_some() || private_key.is_some(),
            "add_scalar",
            "at least one of public_key or private_key is required",
        )?;
        if let Some(key) = public_key.as_deref() {
            validate::exact_length("public_key", key.len(), ED25519_PUBLIC_KEY_SIZE)?;
        }
        if let Some(key) = private_key.as_deref() {
            validate::exact_length("private_key", key.len(), ED25519_PRIVATE_KEY_SIZE)?;
        }
        validate::exact_length("scalar", scalar.len(), ED25519_SCALAR_SIZE)?;

        let instance = self.lifecycle.ready().await?;
        let mut session = Session::open(&instance);
        let scalar_slot = session.secret(SlotKind::Scalar);
        session.write(scalar_slot, scalar);

        let private_slot = match private_key.as_deref() {
            Some(key) => {
                let slot = session.secret(SlotKind::PrivateKey);
                session.write(slot, key);
                Some(slot)
            }
            None => None,
        };
        let public_slot = match public_key.as_deref() {
            Some(key) => {
                let slot = session.slot(SlotKind::PublicKey);
                session.write(slot, key);
                Some(slot)
            }
            None => None,
        };

        let applied = session.invoke(|engine| engine.add_scalar(public_slot, private_slot, scalar_slot));
        if !applied {
            return Err(Error::illegal_argument(
                "add_scalar",
                "public_key is not a valid curve point",
            ));
        }

        if let (Some(slot), Some(out)) = (public_slot, public_key) {
            session.read(slot, out);
        }
        if let (Some(slot), Some(out)) = (private_slot, private_key) {
            session.read(slot, out);
        }

        trace!(
            operation = "add_scalar",
            public = public_slot.is_some(),
            private = private_slot.is_some(),
            "completed"
        );
        Ok(())
    }

    /// Compute a shared secret with a peer's public key
    ///
    /// The result is the raw curve output; hash it (for example with
    /// [`Gateway::sha512`]) before using it as a symmetric key.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalArgument`] if the public key is not a valid curve
    /// point.
    pub async fn key_exchange(
        &self,
        out_shared_secret: &mut [u8],
        public_key: &[u8],
        private_key: &[u8],
    ) -> Result<()> {
        validate::exact_length("out_shared_secret", out_shared_secret.len(), ED25519_SHARED_SECRET_SIZE)?;
        validate::exact_length("public_key", public_key.len(), ED25519_PUBLIC_KEY_SIZE)?;
        validate::exact_length("private_key", private_key.len(), ED25519_PRIVATE_KEY_SIZE)?;

        let instance = self.lifecycle.ready().await?;
        let mut session = Session::open(&instance);
        let private_slot = session.secret(SlotKind::PrivateKey);
        let secret_slot = session.secret(SlotKind::SharedSecret);
        let public_slot = session.slot(SlotKind::PublicKey);

        session.write(private_slot, private_key);
        session.write(public_slot, public_key);
        let exchanged = session.invoke(|engine| engine.key_exchange(secret_slot, public_slot, private_slot));
        if !exchanged {
            return Err(Error::illegal_argument(
                "key_exchange",
                "public_key is not a valid curve point",
            ));
        }
        session.read(secret_slot, out_shared_secret);

        trace!(operation = "key_exchange", "completed");
        Ok(())
    }

    /// SHA-512 of `message` computed by the engine
    ///
    /// The digest is produced in the signature slot. The message is treated
    /// as secret: the used part of the message slot and the signature slot
    /// are scrubbed afterwards.
    pub async fn sha512(&self, out_digest: &mut [u8], message: &[u8]) -> Result<()> {
        validate::exact_length("out_digest", out_digest.len(), ED25519_DIGEST_SIZE)?;

        let instance = self.lifecycle.ready().await?;
        let message_slot = instance.layout.message(message.len())?;
        let mut session = Session::open(&instance);
        session.protect(message_slot);
        let digest_slot = session.secret(SlotKind::Signature);

        session.write(message_slot, message);
        session.invoke(|engine| engine.sha512(digest_slot, message_slot));
        session.read(digest_slot, out_digest);

        trace!(operation = "sha512", message_len = message.len(), "completed");
        Ok(())
    }

    /// Whether a slot currently reads as all zeros
    ///
    /// Reports only the outcome, never the contents.
    pub async fn slot_is_zeroed(&self, kind: SlotKind) -> Result<bool> {
        let instance = self.lifecycle.ready().await?;
        let slot = instance.layout.slot(kind);
        let zeroed = instance.engine.lock().is_zeroed(slot);
        Ok(zeroed)
    }

    /// Whether the engine's scratch region currently reads as all zeros
    pub async fn scratch_is_zeroed(&self) -> Result<bool> {
        let instance = self.lifecycle.ready().await?;
        let zeroed = instance.engine.lock().scratch_is_zeroed();
        Ok(zeroed)
    }
}

impl fmt::Debug for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
