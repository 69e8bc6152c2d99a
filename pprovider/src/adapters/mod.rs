#[cfg(feature = "provider-ollama")]
pub mod ollama;

#[cfg(feature = "provider-openai")]
pub mod openai;

#[cfg(any(feature = "provider-ollama", feature = "provider-openai"))]
pub(crate) mod http {
    use crate::ProviderError;

    pub(crate) fn map_send_error(err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::timeout(err.to_string())
        } else {
            ProviderError::transport(err.to_string())
        }
    }

    pub(crate) fn truncate(input: &str, max: usize) -> String {
        if input.len() <= max {
            return input.to_string();
        }

        let mut end = max;
        while !input.is_char_boundary(end) {
            end -= 1;
        }

        let mut output = input[..end].to_string();
        output.push_str("...");
        output
    }

}
