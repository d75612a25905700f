//! Prelude

#[cfg(feature = "device-selected")]
pub use crate::rcc::RccExt as _stm32f1xx_rcc_rcc_RccExt;
pub use crate::delay::DelayExt as _stm32f1xx_rcc_delay_DelayExt;
pub use crate::time::U32Ext as _stm32f1xx_rcc_time_U32Ext;

pub use fugit::{ExtU32 as _, RateExtU32 as _};
