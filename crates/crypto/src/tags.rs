// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Identity tags binding a ballot to a voter and a process.

use crate::error::Result;
use crate::field::{bytes_to_field, truncate_160, Scalar};
use crate::hash::FieldHasher;

/// Computes identity tags with a fixed hash primitive.
pub struct IdentityTagger<H: FieldHasher> {
    hasher: H,
}

impl<H: FieldHasher> IdentityTagger<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// `H(address, process_id, secret)`
    pub fn commitment(&self, address: &Scalar, process_id: &Scalar, secret: &Scalar) -> Result<Scalar> {
        Ok(self.hasher.hash(&[*address, *process_id, *secret])?)
    }

    /// `H(commitment, secret)`
    pub fn nullifier(&self, commitment: &Scalar, secret: &Scalar) -> Result<Scalar> {
        Ok(self.hasher.hash(&[*commitment, *secret])?)
    }

    /// Low 160 bits of `H(process_id, address, k)`.
    pub fn vote_id(&self, process_id: &Scalar, address: &Scalar, k: &Scalar) -> Result<Scalar> {
        let digest = self.hasher.hash(&[*process_id, *address, *k])?;
        Ok(truncate_160(&digest))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityTags {
    pub commitment: Scalar,
    pub nullifier: Scalar,
    pub vote_id: Option<Scalar>,
}

impl IdentityTags {
    /// Commitment and nullifier from raw identifiers, each read as a big-endian
    /// integer reduced into the field.
    pub fn derive<H: FieldHasher>(
        tagger: &IdentityTagger<H>,
        address: &[u8],
        process_id: &[u8],
        secret: &[u8],
    ) -> Result<Self> {
        let address = bytes_to_field(address);
        let process_id = bytes_to_field(process_id);
        let secret = bytes_to_field(secret);

        let commitment = tagger.commitment(&address, &process_id, &secret)?;
        let nullifier = tagger.nullifier(&commitment, &secret)?;
        Ok(Self {
            commitment,
            nullifier,
            vote_id: None,
        })
    }

    pub fn with_vote_id(mut self, vote_id: Scalar) -> Self {
        self.vote_id = Some(vote_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::from_decimal;
    use crate::hash::{HashPrimitive, Mimc7Hasher, PoseidonHasher};

    fn s(v: u64) -> Scalar {
        Scalar::from(v)
    }

    #[test]
    fn test_mimc_tags_golden() {
        let tagger = IdentityTagger::new(Mimc7Hasher::new());
        let commitment = tagger.commitment(&s(2), &s(1), &s(3)).unwrap();
        assert_eq!(
            commitment,
            from_decimal(
                "6013829243242293905992024646307237477059822757565382297555505446563397067821"
            )
            .unwrap()
        );
        assert_eq!(
            tagger.nullifier(&commitment, &s(3)).unwrap(),
            from_decimal(
                "6058792675722392245054878982954651721093766053186526565715139782777729536371"
            )
            .unwrap()
        );
        assert_eq!(
            tagger.vote_id(&s(1), &s(2), &s(5)).unwrap(),
            from_decimal("1248365446253679822559358867571646078339730817129").unwrap()
        );
    }

    #[test]
    fn test_poseidon_tags_match_primitive() {
        let hasher = PoseidonHasher::new();
        let tagger = IdentityTagger::new(HashPrimitive::Poseidon.hasher());
        let commitment = tagger.commitment(&s(10), &s(20), &s(30)).unwrap();
        assert_eq!(commitment, hasher.hash(&[s(10), s(20), s(30)]).unwrap());
        assert_eq!(
            tagger.nullifier(&commitment, &s(30)).unwrap(),
            hasher.hash(&[commitment, s(30)]).unwrap()
        );
    }

    #[test]
    fn test_nullifier_depends_on_secret() {
        let tagger = IdentityTagger::new(PoseidonHasher::new());
        let commitment = s(99);
        let a = tagger.nullifier(&commitment, &s(1)).unwrap();
        let b = tagger.nullifier(&commitment, &s(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_vote_id_fits_160_bits() {
        let tagger = IdentityTagger::new(PoseidonHasher::new());
        let vote_id = tagger.vote_id(&s(7), &s(8), &s(9)).unwrap();
        let big: num_bigint::BigUint = vote_id.into();
        assert!(big.bits() <= 160);
    }

    #[test]
    fn test_derive_from_bytes() {
        let tagger = IdentityTagger::new(Mimc7Hasher::new());
        let tags = IdentityTags::derive(&tagger, &[0x02], &[0x00, 0x01], &[0x03]).unwrap();
        assert_eq!(tags.commitment, tagger.commitment(&s(2), &s(1), &s(3)).unwrap());
        assert_eq!(tags.nullifier, tagger.nullifier(&tags.commitment, &s(3)).unwrap());
        assert_eq!(tags.vote_id, None);
        assert_eq!(tags.with_vote_id(s(4)).vote_id, Some(s(4)));
    }
}
