use crate::{
    core::domain::{
        model::{HostAvailability, HostInterface},
        value_object::HostId,
    },
    finder::item_finder::ItemFinder,
};
use tracing::warn;

/// Projects availability from the main interface, or the first one when
/// none is flagged main.
pub fn availability_from_interfaces(interfaces: &[HostInterface]) -> HostAvailability {
    interfaces
        .iter()
        .find(|iface| iface.main)
        .or_else(|| interfaces.first())
        .map(HostInterface::availability)
        .unwrap_or_default()
}

impl ItemFinder {
    /// Availability of a host.
    ///
    /// Uses `interfaces` when given, otherwise fetches them from the
    /// interface source. A failed fetch is logged and reported as
    /// [`HostAvailability::Unknown`].
    pub async fn get_availability(
        &self,
        host_id: &HostId,
        interfaces: Option<&[HostInterface]>,
    ) -> HostAvailability {
        if let Some(interfaces) = interfaces {
            return availability_from_interfaces(interfaces);
        }

        match self
            .interfaces
            .get_interfaces(std::slice::from_ref(host_id))
            .await
        {
            Ok(fetched) => availability_from_interfaces(&fetched),
            Err(e) => {
                warn!(host_id = %host_id, error = %e, "failed to fetch host interfaces");
                HostAvailability::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CmdbError,
        core::domain::source::{MockHistorySource, MockInterfaceSource, MockItemSource},
        tests::support::interface,
    };
    use std::sync::Arc;

    fn finder(interfaces: MockInterfaceSource) -> ItemFinder {
        ItemFinder::from_sources(
            Arc::new(MockItemSource::new()),
            Arc::new(MockHistorySource::new()),
            Arc::new(interfaces),
        )
    }

    #[test]
    fn test_main_interface_wins_regardless_of_order() {
        let interfaces = vec![interface("1", false, 2), interface("2", true, 1)];
        assert_eq!(
            availability_from_interfaces(&interfaces),
            HostAvailability::Available
        );

        let reversed = vec![interface("2", true, 1), interface("1", false, 2)];
        assert_eq!(
            availability_from_interfaces(&reversed),
            HostAvailability::Available
        );
    }

    #[test]
    fn test_first_interface_without_main() {
        let interfaces = vec![interface("1", false, 2), interface("2", false, 1)];
        assert_eq!(
            availability_from_interfaces(&interfaces),
            HostAvailability::Unavailable
        );
    }

    #[test]
    fn test_unknown_codes_and_empty_list() {
        assert_eq!(availability_from_interfaces(&[]), HostAvailability::Unknown);
        assert_eq!(
            availability_from_interfaces(&[interface("1", true, 0)]),
            HostAvailability::Unknown
        );
        assert_eq!(
            availability_from_interfaces(&[interface("1", true, 7)]),
            HostAvailability::Unknown
        );
    }

    #[tokio::test]
    async fn test_supplied_interfaces_skip_fetch() {
        // No expectation: a fetch would panic.
        let finder = finder(MockInterfaceSource::new());
        let host = HostId::new_unchecked("10084");
        let interfaces = [interface("1", true, 2)];

        let result = finder.get_availability(&host, Some(&interfaces)).await;
        assert_eq!(result, HostAvailability::Unavailable);
    }

    #[tokio::test]
    async fn test_fetches_interfaces_when_not_supplied() {
        let mut source = MockInterfaceSource::new();
        source
            .expect_get_interfaces()
            .withf(|ids| ids.len() == 1 && ids[0].as_str() == "10084")
            .times(1)
            .returning(|_| Ok(vec![interface("1", false, 0), interface("2", true, 1)]));

        let host = HostId::new_unchecked("10084");
        let result = finder(source).get_availability(&host, None).await;
        assert_eq!(result, HostAvailability::Available);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_unknown() {
        let mut source = MockInterfaceSource::new();
        source
            .expect_get_interfaces()
            .times(1)
            .returning(|_| Err(CmdbError::Connection("timeout".to_string())));

        let host = HostId::new_unchecked("10084");
        let result = finder(source).get_availability(&host, None).await;
        assert_eq!(result, HostAvailability::Unknown);
    }
}
