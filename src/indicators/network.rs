//! Network-graph dataset: country nodes and exporter-to-importer links.

use crate::parser::{NetworkLink, NetworkNode, NetworkView, TradeMatrix, TradeNetwork};
use crate::reference::ReferenceData;
use crate::utils::error::ViewError;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Build a network from the export matrix
///
/// One node per matrix country; a link for every off-diagonal cell with a
/// positive value. Node ids are the reporter codes in `codes` when known,
/// otherwise the country name.
pub fn network_from_matrix(matrix: &TradeMatrix, codes: &HashMap<String, u32>) -> TradeNetwork {
    let ids: Vec<String> = matrix
        .countries
        .iter()
        .map(|c| match codes.get(c) {
            Some(code) => code.to_string(),
            None => c.clone(),
        })
        .collect();

    let nodes = matrix
        .countries
        .iter()
        .zip(&ids)
        .map(|(name, id)| NetworkNode {
            id: id.clone(),
            name: name.clone(),
            code: None,
            region: None,
        })
        .collect();

    let mut links = Vec::new();
    for (i, source) in ids.iter().enumerate() {
        for (j, target) in ids.iter().enumerate() {
            let value = matrix.value(i, j);
            if i != j && value > 0.0 {
                links.push(NetworkLink {
                    source: source.clone(),
                    target: target.clone(),
                    value,
                });
            }
        }
    }

    TradeNetwork { nodes, links }
}

/// Prepare a network for display
///
/// Links whose source or target is not a node id are dropped, and each
/// node is tagged with the region listing its name exactly ("Other" when
/// none does).
///
/// # Errors
/// * `ViewError::Empty` - the network has no nodes
pub fn network_view(network: &TradeNetwork, reference: &ReferenceData) -> Result<NetworkView, ViewError> {
    if network.nodes.is_empty() {
        return Err(ViewError::Empty);
    }

    let node_ids: HashSet<&str> = network.nodes.iter().map(|n| n.id.as_str()).collect();

    let links: Vec<NetworkLink> = network
        .links
        .iter()
        .filter(|l| node_ids.contains(l.source.as_str()) && node_ids.contains(l.target.as_str()))
        .cloned()
        .collect();
    let dropped_links = network.links.len() - links.len();

    if dropped_links > 0 {
        debug!(
            "Filtered links from {} to {}",
            network.links.len(),
            links.len()
        );
    }

    let nodes = network
        .nodes
        .iter()
        .map(|node| NetworkNode {
            region: Some(reference.region_exact(&node.name).to_string()),
            ..node.clone()
        })
        .collect();

    Ok(NetworkView {
        nodes,
        links,
        dropped_links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str) -> NetworkNode {
        NetworkNode {
            id: id.to_string(),
            name: name.to_string(),
            code: None,
            region: None,
        }
    }

    fn link(source: &str, target: &str, value: f64) -> NetworkLink {
        NetworkLink {
            source: source.to_string(),
            target: target.to_string(),
            value,
        }
    }

    #[test]
    fn test_network_from_matrix() {
        let matrix = TradeMatrix::new(
            vec!["China".into(), "USA".into(), "Chad".into()],
            vec![
                vec![0.0, 100.0, 0.0],
                vec![45.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
        );
        let codes = HashMap::from([("China".to_string(), 156), ("USA".to_string(), 842)]);

        let network = network_from_matrix(&matrix, &codes);

        let ids: Vec<&str> = network.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["156", "842", "Chad"]);
        assert_eq!(network.links, vec![link("156", "842", 100.0), link("842", "156", 45.0)]);
    }

    #[test]
    fn test_network_view_filters_and_tags() {
        let network = TradeNetwork {
            nodes: vec![node("156", "China"), node("842", "USA"), node("566", "Nigeria")],
            links: vec![
                link("156", "842", 100.0),
                link("156", "999", 5.0),
                link("410", "156", 7.0),
            ],
        };

        let view = network_view(&network, &ReferenceData::default()).unwrap();

        assert_eq!(view.links, vec![link("156", "842", 100.0)]);
        assert_eq!(view.dropped_links, 2);

        let regions: Vec<Option<&str>> = view.nodes.iter().map(|n| n.region.as_deref()).collect();
        assert_eq!(
            regions,
            vec![Some("Asia-Pacific"), Some("North America"), Some("Other")]
        );
    }

    #[test]
    fn test_network_view_empty() {
        let result = network_view(&TradeNetwork::default(), &ReferenceData::default());
        assert!(matches!(result, Err(ViewError::Empty)));
    }
}
