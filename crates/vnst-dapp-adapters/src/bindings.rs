//! Solidity interfaces for the token and staking contracts.

use alloy::sol;

sol! {
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256 balance);
        function allowance(address owner, address spender) external view returns (uint256 remaining);
        function approve(address spender, uint256 amount) external returns (bool success);
    }

    interface IVnstStaking {
        function stakes(address user) external view returns (uint256 amount, address referrer);
        function getUserStats(address user) external view returns (uint256 totalDirectMembers, uint256 totalEarned);
        function getPendingRewards(address user) external view returns (uint256 vntReward, uint256 usdtReward);
        function minStakeAmount() external view returns (uint256 amount);
        function maxStakeAmount() external view returns (uint256 amount);
        function getReferralCount(address user) external view returns (uint256 count);
        function getLevelReferralCount(address user, uint8 level) external view returns (uint256 count);
        function requiredDirectMembers(uint8 level) external view returns (uint256 count);
        function getWalletBalances() external view returns (uint256 vnstStakingBalance);
        function stake(uint256 amount, address referrer) external;
        function claimRewards() external;
    }
}
