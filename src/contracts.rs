//! Centralized Contract Definitions
//!
//! All Solidity interfaces the engine touches, defined with alloy's `sol!`
//! macro. The collaborator interfaces (ERC20, Augustus registry, price
//! oracle) carry `#[sol(rpc)]` for provider-backed calls.
//!
//! The Augustus swapper interfaces are declared without `rpc`: the engine
//! never calls them through typed bindings (it forwards opaque calldata),
//! but declaring the signatures gives us compile-time selectors for the
//! offset table and typed encoders for tests.

use alloy::sol;

// ── ERC20 ─────────────────────────────────────────────────────────────

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}

// ── Augustus registry ────────────────────────────────────────────────

sol! {
    #[sol(rpc)]
    interface IAugustusRegistry {
        function isValidAugustus(address augustus) external view returns (bool);
    }
}

// ── Price oracle (Aave-style getter: one quote currency, one scale) ──

sol! {
    #[sol(rpc)]
    interface IPriceOracleGetter {
        function getAssetPrice(address asset) external view returns (uint256);
    }
}

// ── Augustus V5 swapper ──────────────────────────────────────────────

sol! {
    interface IAugustusSwapperV5 {
        struct SimpleData {
            address fromToken;
            address toToken;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 expectedAmount;
            address[] callees;
            bytes exchangeData;
            uint256[] startIndexes;
            uint256[] values;
            address beneficiary;
            address partner;
            uint256 feePercent;
            bytes permit;
            uint256 deadline;
            bytes16 uuid;
        }

        struct SellData {
            address fromToken;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 expectedAmount;
            address beneficiary;
            bytes route;
            address partner;
            uint256 feePercent;
            bytes permit;
            uint256 deadline;
            bytes16 uuid;
        }

        struct MegaSwapSellData {
            address fromToken;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 expectedAmount;
            address beneficiary;
            bytes route;
            address partner;
            uint256 feePercent;
            bytes permit;
            uint256 deadline;
            bytes16 uuid;
        }

        struct DirectUniV3 {
            address fromToken;
            address toToken;
            address exchange;
            bytes path;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 expectedAmount;
            uint256 feePercent;
            uint256 deadline;
            address beneficiary;
            bool isApproved;
            bytes permit;
            bytes16 uuid;
        }

        struct DirectCurveV1 {
            address fromToken;
            address toToken;
            address exchange;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 expectedAmount;
            int128 i;
            int128 j;
            address beneficiary;
            bool underlyingSwap;
            bytes permit;
            bytes16 uuid;
        }

        struct DirectBalancerV2 {
            address fromToken;
            address toToken;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 expectedAmount;
            address vault;
            bytes swaps;
            bytes assets;
            bytes funds;
            uint256 deadline;
            address beneficiary;
            bytes permit;
            bytes16 uuid;
        }

        // Direct single-hop swaps
        function swapOnUniswap(uint256 amountIn, uint256 amountOutMin, address[] calldata path) external returns (uint256);
        function swapOnUniswapFork(address factory, bytes32 initCode, uint256 amountIn, uint256 amountOutMin, address[] calldata path) external returns (uint256);
        function swapOnUniswapV2Fork(address tokenIn, uint256 amountIn, uint256 amountOutMin, address weth, uint256[] calldata pools) external returns (uint256);
        function buyOnUniswap(uint256 amountInMax, uint256 amountOut, address[] calldata path) external returns (uint256);
        function buyOnUniswapFork(address factory, bytes32 initCode, uint256 amountInMax, uint256 amountOut, address[] calldata path) external returns (uint256);
        function buyOnUniswapV2Fork(address tokenIn, uint256 amountInMax, uint256 amountOut, address weth, uint256[] calldata pools) external returns (uint256);

        // Simple swaps (single venue, pre-built exchange calldata)
        function simpleSwap(SimpleData calldata data) external payable returns (uint256 receivedAmount);
        function simpleBuy(SimpleData calldata data) external payable returns (uint256 receivedAmount);

        // Multi-hop swaps
        function multiSwap(SellData calldata data) external payable returns (uint256 receivedAmount);
        function megaSwap(MegaSwapSellData calldata data) external payable returns (uint256 receivedAmount);

        // Per-venue direct swaps
        function directUniV3Swap(DirectUniV3 calldata data) external payable returns (uint256 receivedAmount);
        function directCurveV1Swap(DirectCurveV1 calldata data) external payable returns (uint256 receivedAmount);
        function directBalancerV2GivenInSwap(DirectBalancerV2 calldata data) external payable returns (uint256 receivedAmount);
        function directBalancerV2GivenOutSwap(DirectBalancerV2 calldata data) external payable returns (uint256 receivedAmount);
    }
}

// ── Augustus V6 swapper ──────────────────────────────────────────────

sol! {
    interface IAugustusSwapperV6 {
        struct GenericData {
            address srcToken;
            address destToken;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 quotedAmount;
            bytes32 metadata;
            address beneficiary;
        }

        struct UniswapV2Data {
            address srcToken;
            address destToken;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 quotedAmount;
            bytes32 metadata;
            address beneficiary;
            bytes pools;
        }

        struct UniswapV3Data {
            address srcToken;
            address destToken;
            uint256 fromAmount;
            uint256 toAmount;
            uint256 quotedAmount;
            bytes32 metadata;
            address beneficiary;
            bytes pools;
        }

        struct BalancerV2Data {
            uint256 fromAmount;
            uint256 toAmount;
            uint256 quotedAmount;
            bytes32 metadata;
            uint256 beneficiaryAndApproveFlag;
        }

        struct MakerPSMData {
            address srcToken;
            address destToken;
            uint256 srcAmount;
            uint256 destAmount;
            uint256 toll;
            uint256 to18ConversionFactor;
            address exchange;
            bytes32 metadata;
            uint256 beneficiaryDirectionApproveFlag;
        }

        // Generic swaps through an executor contract
        function swapExactAmountIn(address executor, GenericData swapData, uint256 partnerAndFee, bytes calldata permit, bytes calldata executorData) external payable returns (uint256 receivedAmount, uint256 paraswapShare);
        function swapExactAmountOut(address executor, GenericData swapData, uint256 partnerAndFee, bytes calldata permit, bytes calldata executorData) external payable returns (uint256 spentAmount, uint256 paraswapShare);

        // Per-venue direct swaps
        function swapExactAmountInOnUniswapV2(UniswapV2Data uniData, uint256 partnerAndFee, bytes calldata permit) external payable returns (uint256 receivedAmount);
        function swapExactAmountOutOnUniswapV2(UniswapV2Data uniData, uint256 partnerAndFee, bytes calldata permit) external payable returns (uint256 spentAmount);
        function swapExactAmountInOnUniswapV3(UniswapV3Data uniData, uint256 partnerAndFee, bytes calldata permit) external payable returns (uint256 receivedAmount);
        function swapExactAmountOutOnUniswapV3(UniswapV3Data uniData, uint256 partnerAndFee, bytes calldata permit) external payable returns (uint256 spentAmount);
        function swapExactAmountInOnBalancerV2(BalancerV2Data balancerData, uint256 partnerAndFee, bytes calldata permit, bytes calldata data) external payable returns (uint256 receivedAmount);
        function swapExactAmountOutOnBalancerV2(BalancerV2Data balancerData, uint256 partnerAndFee, bytes calldata permit, bytes calldata data) external payable returns (uint256 spentAmount);

        // Combined exact-in/exact-out PSM swap. Reachable only through the
        // generic entry points above; deliberately absent from the amount
        // offset table (see selectors.rs).
        function swapExactAmountInOutOnMakerPSM(MakerPSMData psmData, uint256 partnerAndFee, bytes calldata permit) external payable returns (uint256 receivedAmount);
    }
}
