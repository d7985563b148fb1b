use std::collections::HashSet;

use crate::builder::Graph;

/// Partition the graph's vertices into connected components. Discovery
/// follows vertex list order; traversal is an explicit-stack DFS so the
/// call depth stays flat no matter how long the graph's paths get.
pub fn connected_components(graph: &Graph) -> Vec<Vec<String>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut components = Vec::new();

    for vertex in &graph.vertices {
        if !visited.insert(vertex.id.as_str()) {
            continue;
        }

        let mut component = Vec::new();
        let mut stack = vec![vertex.id.as_str()];
        while let Some(id) = stack.pop() {
            component.push(id.to_string());
            if let Some(entries) = graph.adjacency.get(id) {
                for entry in entries {
                    if visited.insert(entry.to.as_str()) {
                        stack.push(entry.to.as_str());
                    }
                }
            }
        }
        components.push(component);
    }

    components
}
