//! RPC interface for the Lending pallet.

use codec::Codec;
use jsonrpsee::{
    core::{async_trait, Error as JsonRpseeError, RpcResult},
    proc_macros::rpc,
    types::error::{CallError, ErrorCode, ErrorObject},
};
use sp_api::ProvideRuntimeApi;
use sp_blockchain::HeaderBackend;
use sp_runtime::{
    traits::{Block as BlockT, MaybeDisplay, MaybeFromStr},
    DispatchError,
};
use std::sync::Arc;

pub use lending_rpc_runtime_api::{BalanceWrapper, LendingApi as LendingRuntimeApi, PoolInfo, UserPosition};

#[rpc(client, server)]
pub trait LendingApi<BlockHash, AccountId, Balance>
where
    AccountId: Codec,
    Balance: Codec + MaybeDisplay + MaybeFromStr,
{
    #[method(name = "lending_getUserPosition")]
    fn get_user_position(&self, account_id: AccountId, at: Option<BlockHash>) -> RpcResult<UserPosition<Balance>>;

    #[method(name = "lending_calculateMaxWithdraw")]
    fn calculate_max_withdraw(&self, account_id: AccountId, at: Option<BlockHash>)
        -> RpcResult<BalanceWrapper<Balance>>;

    #[method(name = "lending_calculateMaxBorrow")]
    fn calculate_max_borrow(&self, account_id: AccountId, at: Option<BlockHash>) -> RpcResult<BalanceWrapper<Balance>>;

    #[method(name = "lending_getPoolInfo")]
    fn get_pool_info(&self, at: Option<BlockHash>) -> RpcResult<PoolInfo<Balance>>;

    #[method(name = "lending_freeLiquidity")]
    fn free_liquidity(&self, at: Option<BlockHash>) -> RpcResult<BalanceWrapper<Balance>>;

    #[method(name = "lending_allowance")]
    fn allowance(&self, account_id: AccountId, at: Option<BlockHash>) -> RpcResult<BalanceWrapper<Balance>>;
}

fn internal_err<T: ToString>(message: T) -> JsonRpseeError {
    JsonRpseeError::Call(CallError::Custom(ErrorObject::owned(
        ErrorCode::InternalError.code(),
        message.to_string(),
        None::<()>,
    )))
}

/// A struct that implements the [`LendingApi`].
pub struct Lending<C, B> {
    client: Arc<C>,
    _marker: std::marker::PhantomData<B>,
}

impl<C, B> Lending<C, B> {
    /// Create new `Lending` with the given reference to the client.
    pub fn new(client: Arc<C>) -> Self {
        Lending {
            client,
            _marker: Default::default(),
        }
    }
}

fn handle_response<T, E: std::fmt::Debug>(result: Result<Result<T, DispatchError>, E>, msg: String) -> RpcResult<T> {
    result
        .map_err(|err| internal_err(format!("Runtime error: {:?}: {:?}", msg, err)))?
        .map_err(|err| internal_err(format!("Execution error: {:?}: {:?}", msg, err)))
}

#[async_trait]
impl<C, Block, AccountId, Balance> LendingApiServer<<Block as BlockT>::Hash, AccountId, Balance> for Lending<C, Block>
where
    Block: BlockT,
    C: Send + Sync + 'static + ProvideRuntimeApi<Block> + HeaderBackend<Block>,
    C::Api: LendingRuntimeApi<Block, AccountId, Balance>,
    AccountId: Codec,
    Balance: Codec + MaybeDisplay + MaybeFromStr,
{
    fn get_user_position(
        &self,
        account_id: AccountId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<UserPosition<Balance>> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);

        handle_response(
            api.get_user_position(at, account_id),
            "Unable to get the account position".into(),
        )
    }

    fn calculate_max_withdraw(
        &self,
        account_id: AccountId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<BalanceWrapper<Balance>> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);

        handle_response(
            api.calculate_max_withdraw(at, account_id),
            "Unable to calculate the maximum withdrawal".into(),
        )
    }

    fn calculate_max_borrow(
        &self,
        account_id: AccountId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<BalanceWrapper<Balance>> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);

        handle_response(
            api.calculate_max_borrow(at, account_id),
            "Unable to calculate the maximum borrow".into(),
        )
    }

    fn get_pool_info(&self, at: Option<<Block as BlockT>::Hash>) -> RpcResult<PoolInfo<Balance>> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);

        handle_response(api.get_pool_info(at), "Unable to get the pool info".into())
    }

    fn free_liquidity(&self, at: Option<<Block as BlockT>::Hash>) -> RpcResult<BalanceWrapper<Balance>> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);

        handle_response(api.free_liquidity(at), "Unable to get the free liquidity".into())
    }

    fn allowance(
        &self,
        account_id: AccountId,
        at: Option<<Block as BlockT>::Hash>,
    ) -> RpcResult<BalanceWrapper<Balance>> {
        let api = self.client.runtime_api();
        let at = at.unwrap_or_else(|| self.client.info().best_hash);

        api.allowance(at, account_id)
            .map_err(|err| internal_err(format!("Unable to get the allowance: {:?}", err)))
    }
}
