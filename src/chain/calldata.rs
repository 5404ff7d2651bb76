//! Raw calldata for the faucet fallback path
//!
//! Some dev tokens reject the typed `mint(address,uint256)` call through the
//! RPC layer but accept `_mint(address,uint256)` sent as a plain transaction.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use super::bindings::IFaucetToken;

/// Selector of `_mint(address,uint256)`
pub const FAUCET_MINT_SELECTOR: [u8; 4] = IFaucetToken::_mintCall::SELECTOR;

/// Encode the fallback `_mint(to, amount)` call
pub fn faucet_mint_calldata(to: Address, amount: U256) -> Bytes {
    Bytes::from(IFaucetToken::_mintCall { to, amount }.abi_encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector() {
        assert_eq!(FAUCET_MINT_SELECTOR, [0x4e, 0x6e, 0xc2, 0x47]);
    }

    #[test]
    fn test_layout() {
        let to = Address::repeat_byte(0xab);
        let data = faucet_mint_calldata(to, U256::from(1000u64));

        assert_eq!(data.len(), 68);
        assert_eq!(&data[..4], &FAUCET_MINT_SELECTOR);
        assert!(data[4..16].iter().all(|b| *b == 0));
        assert_eq!(&data[16..36], to.as_slice());
        assert_eq!(data[67], 0xe8);
        assert_eq!(data[66], 0x03);
    }

    #[test]
    fn test_differs_from_typed_selector() {
        assert_ne!(IFaucetToken::mintCall::SELECTOR, FAUCET_MINT_SELECTOR);
    }
}
