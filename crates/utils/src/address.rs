pub const DEFAULT_SHORTEN_CHARS: usize = 5;

/// Keeps the first and last `chars` characters of an address: `0x108...88d73`.
pub fn shorten_address(address: &str, chars: usize) -> String {
    if address.len() <= chars * 2 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..chars], &address[address.len() - chars..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_default() {
        assert_eq!(shorten_address("0x108e41248841d0c0d2303222324fF21C3ca88d73", DEFAULT_SHORTEN_CHARS), "0x108...88d73");
    }

    #[test]
    fn test_shorten_custom_width() {
        assert_eq!(shorten_address("0x108e41248841d0c0d2303222324fF21C3ca88d73", 4), "0x10...8d73");
    }

    #[test]
    fn test_short_input_is_untouched() {
        assert_eq!(shorten_address("0x1234", 5), "0x1234");
    }
}
