//! Data Transfer Objects - RPC 消息定义
//!
//! 字段契约：
//! - SynthesisRequest: `text` + `audio`（参考波形字节）
//! - ProcessingResponse: `status` + `result.processed_audio`
//!
//! `status` 是线上唯一的成败判别字段："OK" 或 "ERROR: <message>"。
//! 字节字段在 JSON 线上使用 base64 编码。

use serde::{Deserialize, Serialize};

use crate::application::ProcessError;

/// base64 字节字段编解码
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// 合成请求
#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 参考音色样本的原始波形字节
    #[serde(with = "base64_bytes")]
    pub audio: Vec<u8>,
}

/// 合成结果
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioResult {
    /// 合成波形字节（失败时为空）
    #[serde(with = "base64_bytes")]
    pub processed_audio: Vec<u8>,
}

/// 处理响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessingResponse {
    pub status: String,
    pub result: AudioResult,
}

impl ProcessingResponse {
    /// 成功响应
    pub fn ok(audio: Vec<u8>) -> Self {
        Self {
            status: "OK".to_string(),
            result: AudioResult {
                processed_audio: audio,
            },
        }
    }

    /// 失败响应
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            status: format!("ERROR: {}", message),
            result: AudioResult {
                processed_audio: Vec::new(),
            },
        }
    }

    /// 处理结果到线上响应的映射（Response Builder）
    ///
    /// 只产生 "OK" 与 "ERROR: <message>" 两种 status
    pub fn from_outcome(outcome: Result<Vec<u8>, ProcessError>) -> Self {
        match outcome {
            Ok(audio) => Self::ok(audio),
            Err(e) => Self::error(e),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}
