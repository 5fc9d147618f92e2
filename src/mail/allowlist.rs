/// Fixed set of email addresses permitted as inbound senders and
/// outbound recipients. Membership is an exact, case-sensitive string
/// match.
#[derive(Clone, Debug)]
pub struct AllowList {
    addresses: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, address: &str) -> bool {
        self.addresses.iter().any(|allowed| allowed == address)
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_membership() {
        let list = AllowList::new(["939342547@qq.com", "jiangjimjim@gmail.com"]);
        assert!(list.is_allowed("939342547@qq.com"));
        assert!(list.is_allowed("jiangjimjim@gmail.com"));
        assert!(!list.is_allowed("random@example.com"));
        assert!(!list.is_allowed(""));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let list = AllowList::new(["jiangjimjim@gmail.com"]);
        assert!(!list.is_allowed("JiangJimJim@gmail.com"));
        assert!(!list.is_allowed("jiangjimjim@GMAIL.COM"));
    }
}
