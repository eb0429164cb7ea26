//! Hash registry as the market's root provider.

use crate::ports::RootProvider;
use fm_01_hash_registry::{HashRegistryApi, HashRegistryService, SignatureRecovery};
use shared_types::Hash;

impl<R: SignatureRecovery> RootProvider for HashRegistryService<R> {
    fn hash_value(&self, hash_type: &Hash) -> Hash {
        self.get_hash_value(hash_type)
    }
}
