//! Network registry and selection
//!
//! The registry owns the four verified profiles and remembers which one the
//! process selected. Selection happens once at bootstrap; after that every
//! subsystem reads the active parameters through [`NetworkRegistry::active_params`]
//! or the process-wide [`params`].
//!
//! Reads of Main, Testnet and Regtest never take a lock. UnitTest sits behind
//! an `RwLock` so [`ModifiableParams`] can swap in an updated copy; callers
//! holding an earlier `Arc` keep their snapshot.

use parking_lot::RwLock;
use rand::Rng;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info};

use super::{
    apply_regtest_overrides, apply_testnet_overrides, apply_unittest_overrides,
    build_main_profile, verify_genesis, CheckpointTable, NetworkId, ParameterSet, ParamsError,
};
use crate::consensus::HeaderHasher;
use crate::p2p::{convert_seeds, unix_now};

/// Log a parameter error and abort the caller
fn fatal(err: ParamsError) -> ! {
    error!(error = %err, "Fatal chain parameters error");
    panic!("{err}")
}

/// The verified profiles of every network plus the process selection
pub struct NetworkRegistry {
    main: Arc<ParameterSet>,
    testnet: Arc<ParameterSet>,
    regtest: Arc<ParameterSet>,
    unittest: RwLock<Arc<ParameterSet>>,
    selected: OnceLock<NetworkId>,
}

impl NetworkRegistry {
    /// Build and verify all profiles, seeding from the clock and thread RNG
    ///
    /// Panics if any profile fails verification.
    pub fn new(hasher: &dyn HeaderHasher) -> Self {
        Self::with_seed_source(hasher, unix_now(), &mut rand::thread_rng())
    }

    /// Like [`Self::new`] with an explicit clock and RNG for seed conversion
    pub fn with_seed_source<R: Rng + ?Sized>(hasher: &dyn HeaderHasher, now: u64, rng: &mut R) -> Self {
        Self::try_with_seed_source(hasher, now, rng).unwrap_or_else(|err| fatal(err))
    }

    pub fn try_with_seed_source<R: Rng + ?Sized>(
        hasher: &dyn HeaderHasher,
        now: u64,
        rng: &mut R,
    ) -> Result<Self, ParamsError> {
        let main = build_main_profile();
        let testnet = apply_testnet_overrides(main.clone());
        let regtest = apply_regtest_overrides(testnet.clone());
        // shares main's checkpoint table
        let unittest = apply_unittest_overrides(main.clone());

        let mut profiles = [main, testnet, regtest, unittest];
        for params in profiles.iter_mut() {
            params.fixed_seeds = convert_seeds(params.fixed_seed_specs, now, rng);
            verify_profile(params, hasher)?;
        }
        let [main, testnet, regtest, unittest] = profiles;

        Ok(Self {
            main: Arc::new(main),
            testnet: Arc::new(testnet),
            regtest: Arc::new(regtest),
            unittest: RwLock::new(Arc::new(unittest)),
            selected: OnceLock::new(),
        })
    }

    /// Parameters of `id`, whether or not it is selected
    pub fn params_for(&self, id: NetworkId) -> Arc<ParameterSet> {
        match id {
            NetworkId::Main => Arc::clone(&self.main),
            NetworkId::Testnet => Arc::clone(&self.testnet),
            NetworkId::Regtest => Arc::clone(&self.regtest),
            NetworkId::UnitTest => Arc::clone(&self.unittest.read()),
        }
    }

    /// Make `id` the active network for the rest of the process
    ///
    /// Selecting the active network again is a no-op; selecting a different
    /// one panics.
    pub fn select(&self, id: NetworkId) -> Arc<ParameterSet> {
        self.try_select(id).unwrap_or_else(|err| fatal(err))
    }

    pub fn try_select(&self, id: NetworkId) -> Result<Arc<ParameterSet>, ParamsError> {
        let mut first = false;
        let active = *self.selected.get_or_init(|| {
            first = true;
            id
        });

        if active != id {
            return Err(ParamsError::AlreadySelected {
                active,
                requested: id,
            });
        }
        if first {
            info!(
                network = %id,
                test_network = id.is_test_network(),
                port = self.params_for(id).default_port,
                "Selected chain parameters"
            );
        } else {
            debug!(network = %id, "Network already selected");
        }
        Ok(self.params_for(id))
    }

    pub fn selected_network(&self) -> Option<NetworkId> {
        self.selected.get().copied()
    }

    /// Active network id; panics before selection
    pub fn network_id(&self) -> NetworkId {
        self.selected_network()
            .unwrap_or_else(|| fatal(ParamsError::NotSelected))
    }

    /// Active parameters; panics before selection
    pub fn active_params(&self) -> Arc<ParameterSet> {
        self.try_active_params().unwrap_or_else(|err| fatal(err))
    }

    pub fn try_active_params(&self) -> Result<Arc<ParameterSet>, ParamsError> {
        let id = self.selected_network().ok_or(ParamsError::NotSelected)?;
        Ok(self.params_for(id))
    }

    /// Checkpoints of the active network
    pub fn checkpoints(&self) -> Arc<CheckpointTable> {
        Arc::clone(&self.active_params().checkpoints)
    }

    /// Mutation handle for the unit-test network; panics on any other
    pub fn modifiable_params(&self) -> ModifiableParams<'_> {
        self.try_modifiable_params().unwrap_or_else(|err| fatal(err))
    }

    pub fn try_modifiable_params(&self) -> Result<ModifiableParams<'_>, ParamsError> {
        match self.selected_network() {
            None => Err(ParamsError::NotSelected),
            Some(NetworkId::UnitTest) => Ok(ModifiableParams {
                slot: &self.unittest,
            }),
            Some(other) => Err(ParamsError::NotModifiable(other)),
        }
    }
}

impl fmt::Debug for NetworkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkRegistry")
            .field("selected", &self.selected.get())
            .finish_non_exhaustive()
    }
}

/// Genesis identity, checkpoint anchor and hard-coded keys of one profile
fn verify_profile(params: &ParameterSet, hasher: &dyn HeaderHasher) -> Result<(), ParamsError> {
    verify_genesis(params, hasher)?;
    params.checkpoints.validate_anchor(&params.genesis_hash())?;
    params.verify_keys()
}

/// Setters for the unit-test network
///
/// Each call replaces the shared record with an updated copy.
#[derive(Debug)]
pub struct ModifiableParams<'a> {
    slot: &'a RwLock<Arc<ParameterSet>>,
}

impl ModifiableParams<'_> {
    fn update(&self, apply: impl FnOnce(&mut ParameterSet)) {
        let mut slot = self.slot.write();
        apply(Arc::make_mut(&mut *slot));
    }

    pub fn current(&self) -> Arc<ParameterSet> {
        Arc::clone(&self.slot.read())
    }

    pub fn set_enforce_block_upgrade_majority(&self, value: u32) {
        self.update(|params| params.majority.enforce = value);
    }

    pub fn set_reject_block_outdated_majority(&self, value: u32) {
        self.update(|params| params.majority.reject_outdated = value);
    }

    pub fn set_to_check_block_upgrade_majority(&self, value: u32) {
        self.update(|params| params.majority.window = value);
    }

    pub fn set_default_consistency_checks(&self, value: bool) {
        self.update(|params| params.policy.default_consistency_checks = value);
    }

    pub fn set_skip_proof_of_work_check(&self, value: bool) {
        self.update(|params| params.policy.skip_proof_of_work_check = value);
    }
}

static GLOBAL: OnceLock<NetworkRegistry> = OnceLock::new();

/// Build the process-wide registry; later calls return the first one
pub fn init_global(hasher: &dyn HeaderHasher) -> &'static NetworkRegistry {
    GLOBAL.get_or_init(|| NetworkRegistry::new(hasher))
}

pub fn try_global() -> Result<&'static NetworkRegistry, ParamsError> {
    GLOBAL.get().ok_or(ParamsError::RegistryNotInitialised)
}

/// The process-wide registry; panics before [`init_global`]
pub fn global() -> &'static NetworkRegistry {
    try_global().unwrap_or_else(|err| fatal(err))
}

/// Select the process-wide network
pub fn select_network(id: NetworkId) -> Arc<ParameterSet> {
    global().select(id)
}

/// Active process-wide parameters
pub fn params() -> Arc<ParameterSet> {
    global().active_params()
}

/// Unit-test mutation handle on the process-wide registry
pub fn modifiable_params() -> ModifiableParams<'static> {
    global().modifiable_params()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::published_genesis_digests;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry() -> NetworkRegistry {
        let mut rng = StdRng::seed_from_u64(42);
        NetworkRegistry::try_with_seed_source(&published_genesis_digests(), 1_700_000_000, &mut rng).unwrap()
    }

    #[test]
    fn test_nothing_selected_initially() {
        let registry = registry();
        assert_eq!(registry.selected_network(), None);
        assert_eq!(registry.try_active_params().unwrap_err(), ParamsError::NotSelected);
        assert_eq!(registry.try_modifiable_params().unwrap_err(), ParamsError::NotSelected);
    }

    #[test]
    fn test_select_then_read() {
        let registry = registry();
        let selected = registry.try_select(NetworkId::Regtest).unwrap();
        assert_eq!(selected.network_id, NetworkId::Regtest);
        assert_eq!(registry.active_params().network_id, NetworkId::Regtest);
        assert_eq!(registry.network_id(), NetworkId::Regtest);
        assert_eq!(registry.checkpoints().last_checkpoint_time, 1552053992);
    }

    #[test]
    fn test_reselect_policy() {
        let registry = registry();
        registry.try_select(NetworkId::Testnet).unwrap();
        assert!(registry.try_select(NetworkId::Testnet).is_ok());
        assert_eq!(
            registry.try_select(NetworkId::Main).unwrap_err(),
            ParamsError::AlreadySelected {
                active: NetworkId::Testnet,
                requested: NetworkId::Main,
            }
        );
        assert_eq!(registry.network_id(), NetworkId::Testnet);
    }

    #[test]
    fn test_fixed_seeds_converted() {
        let registry = registry();
        let main = registry.params_for(NetworkId::Main);
        assert_eq!(main.fixed_seeds.len(), main.fixed_seed_specs.len());
        assert!(registry.params_for(NetworkId::Testnet).fixed_seeds.is_empty());
    }

    #[test]
    fn test_unittest_shares_main_checkpoints() {
        let registry = registry();
        assert!(Arc::ptr_eq(
            &registry.params_for(NetworkId::Main).checkpoints,
            &registry.params_for(NetworkId::UnitTest).checkpoints,
        ));
    }

    #[test]
    fn test_modifiable_only_on_unittest() {
        let registry = registry();
        registry.select(NetworkId::Main);
        assert_eq!(
            registry.try_modifiable_params().unwrap_err(),
            ParamsError::NotModifiable(NetworkId::Main)
        );
    }

    #[test]
    fn test_modifications_are_visible_to_new_reads() {
        let registry = registry();
        registry.select(NetworkId::UnitTest);
        let before = registry.active_params();

        let handle = registry.modifiable_params();
        handle.set_enforce_block_upgrade_majority(10);
        handle.set_reject_block_outdated_majority(20);
        handle.set_to_check_block_upgrade_majority(30);
        handle.set_default_consistency_checks(false);
        handle.set_skip_proof_of_work_check(true);

        let after = registry.active_params();
        assert_eq!(after.majority.enforce, 10);
        assert_eq!(after.majority.reject_outdated, 20);
        assert_eq!(after.majority.window, 30);
        assert!(!after.policy.default_consistency_checks);
        assert!(after.policy.skip_proof_of_work_check);
        assert_eq!(handle.current().majority, after.majority);

        // earlier snapshot is untouched
        assert_eq!(before.majority.enforce, 750);
        assert!(!before.policy.skip_proof_of_work_check);
        // main never changes
        assert_eq!(registry.params_for(NetworkId::Main).majority.enforce, 750);
    }

    #[test]
    fn test_wrong_hasher_fails_verification() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = NetworkRegistry::try_with_seed_source(&crate::consensus::DoubleSha256, 0, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            ParamsError::GenesisMismatch { network: NetworkId::Main, field: "hash", .. }
        ));
    }
}
