// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Baby Jubjub in circomlib form (`168700·x² + y² = 1 + 168696·x²·y²`) and key management.

use crate::error::{CryptoError, Result};
use crate::field::{from_subgroup, to_decimal, to_subgroup_scalar, Scalar, SubgroupScalar};
use ark_ec::models::CurveConfig;
use ark_ec::twisted_edwards::{Affine, MontCurveConfig, Projective, TECurveConfig};
use ark_ec::CurveGroup;
use ark_ff::{MontFp, PrimeField, Zero};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BabyJubJubConfig;

impl CurveConfig for BabyJubJubConfig {
    type BaseField = Scalar;
    type ScalarField = SubgroupScalar;

    const COFACTOR: &'static [u64] = &[8];

    /// COFACTOR^(-1) mod subgroup order
    const COFACTOR_INV: SubgroupScalar = MontFp!(
        "2394026564107420727433200628387514462817212225638746351800188703329891451411"
    );
}

impl TECurveConfig for BabyJubJubConfig {
    const COEFF_A: Scalar = MontFp!("168700");
    const COEFF_D: Scalar = MontFp!("168696");

    /// circomlib `Base8`
    const GENERATOR: Affine<Self> = Affine::new_unchecked(
        MontFp!("5299619240641551281634865583518297030282874472190772894086521144482721001553"),
        MontFp!("16950150798460657717958625567821834550301663161624707787222815936182638968203"),
    );

    type MontCurveConfig = BabyJubJubConfig;
}

impl MontCurveConfig for BabyJubJubConfig {
    const COEFF_A: Scalar = MontFp!("168698");
    const COEFF_B: Scalar = MontFp!("1");

    type TECurveConfig = BabyJubJubConfig;
}

pub type BabyJubJubAffine = Affine<BabyJubJubConfig>;
pub type BabyJubJubProjective = Projective<BabyJubJubConfig>;

/// Affine point on Baby Jubjub.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    pub x: Scalar,
    pub y: Scalar,
}

impl CurvePoint {
    /// Generator of the prime-order subgroup.
    pub fn base() -> Self {
        Self::from_affine(&BabyJubJubConfig::GENERATOR)
    }

    /// Builds a point from externally supplied coordinates, checking that it lies
    /// on the curve and in the prime-order subgroup.
    pub fn from_coordinates(x: Scalar, y: Scalar) -> Result<Self> {
        let affine = BabyJubJubAffine::new_unchecked(x, y);
        if !affine.is_on_curve() || !affine.is_in_correct_subgroup_assuming_on_curve() {
            return Err(CryptoError::InvalidPoint {
                x: to_decimal(&x),
                y: to_decimal(&y),
            });
        }
        Ok(Self { x, y })
    }

    pub fn from_affine(point: &BabyJubJubAffine) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }

    pub fn to_affine(&self) -> BabyJubJubAffine {
        BabyJubJubAffine::new_unchecked(self.x, self.y)
    }

    /// `scalar · self`, where `scalar` is reduced modulo the subgroup order.
    pub fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self.mul_subgroup(&to_subgroup_scalar(scalar))
    }

    pub fn mul_subgroup(&self, scalar: &SubgroupScalar) -> Self {
        let product: BabyJubJubProjective = self.to_affine() * *scalar;
        Self::from_affine(&product.into_affine())
    }

    pub fn add(&self, other: &CurvePoint) -> Self {
        let sum: BabyJubJubProjective = self.to_affine() + other.to_affine();
        Self::from_affine(&sum.into_affine())
    }

    /// The literal `(0, 0)` pair used for unused ciphertext slots. Not a curve point.
    pub fn zero_pair() -> Self {
        Self {
            x: Scalar::zero(),
            y: Scalar::zero(),
        }
    }

    pub fn coordinates(&self) -> [Scalar; 2] {
        [self.x, self.y]
    }

    pub fn to_strings(&self) -> [String; 2] {
        [to_decimal(&self.x), to_decimal(&self.y)]
    }
}

/// Caller-owned key pair with `public = private · Base8`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub private: SubgroupScalar,
    pub public: CurvePoint,
}

impl KeyPair {
    pub fn from_private(private: SubgroupScalar) -> Self {
        let public = CurvePoint::base().mul_subgroup(&private);
        Self { private, public }
    }

    /// Private key lifted into the circuit field.
    pub fn private_scalar(&self) -> Scalar {
        from_subgroup(&self.private)
    }
}

/// Draws a statistically uniform subgroup scalar from the OS CSPRNG.
///
/// 64 bytes are reduced modulo the subgroup order so the bias is negligible.
fn random_subgroup_scalar() -> Result<SubgroupScalar> {
    let mut bytes = [0u8; 64];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::Randomness(e.to_string()))?;
    Ok(SubgroupScalar::from_le_bytes_mod_order(&bytes))
}

pub fn generate_key_pair() -> Result<KeyPair> {
    let private = random_subgroup_scalar()?;
    let pair = KeyPair::from_private(private);
    debug!(public_x = %to_decimal(&pair.public.x), "generated Baby Jubjub key pair");
    Ok(pair)
}

/// Fresh per-ballot seed for the nonce chain.
pub fn random_k() -> Result<SubgroupScalar> {
    random_subgroup_scalar()
}
