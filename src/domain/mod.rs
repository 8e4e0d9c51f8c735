// 領域層：請求/回應格式與 ports

pub mod model;
pub mod ports;
