use std::collections::BTreeMap;

/// One node of a template tree: named child nodes for subdirectories, plus
/// the relative paths of the template files that terminate at this level.
///
/// A segment name may hold children and leaves at the same time, so a file
/// `admin` and a directory `admin/` in the same unit both survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTree {
    children: BTreeMap<String, TemplateTree>,
    leaves: Vec<String>,
}

impl TemplateTree {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.leaves.is_empty()
    }

    /// Relative paths of the templates stored directly at this node, in
    /// discovery order.
    pub fn leaves(&self) -> &[String] {
        &self.leaves
    }

    pub fn child(&self, name: &str) -> Option<&TemplateTree> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &TemplateTree)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walk down a chain of segment names. Empty chain returns self.
    pub fn descend(&self, segments: &[&str]) -> Option<&TemplateTree> {
        let mut node = self;
        for segment in segments {
            node = node.children.get(*segment)?;
        }
        Some(node)
    }

    /// Total number of template paths stored in this node and below.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
            + self
                .children
                .values()
                .map(TemplateTree::leaf_count)
                .sum::<usize>()
    }

    /// Resolve a template reference like `admin.users.index` or
    /// `admin/users/index` to the stored relative path of a matching
    /// template file. References split on `.` and on the delimiter the
    /// tree was built with. The final reference segment is compared
    /// against each leaf's file name with any extension stripped, so
    /// `admin.users.index` finds `admin/users/index.twig`.
    pub fn resolve(&self, reference: &str, delimiter: char) -> Option<&str> {
        let segments: Vec<&str> = reference
            .split(['.', delimiter])
            .filter(|s| !s.is_empty())
            .collect();
        let (name, dirs) = segments.split_last()?;
        let node = self.descend(dirs)?;

        node.leaves
            .iter()
            .find(|leaf| {
                let file = leaf.rsplit(delimiter).next().unwrap_or(leaf);
                let stem = file.split_once('.').map_or(file, |(stem, _)| stem);
                stem == *name || file == *name
            })
            .map(String::as_str)
    }

    /// Indented plain-text rendering for CLI output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        for leaf in &self.leaves {
            out.push_str(&format!("{}- {}\n", indent, leaf));
        }
        for (name, child) in &self.children {
            out.push_str(&format!("{}- {}/\n", indent, name));
            child.render_into(out, depth + 1);
        }
    }
}

/// Converts flat, delimiter-separated relative paths into [`TemplateTree`]s.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    delimiter: char,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self { delimiter: '/' }
    }
}

impl TreeBuilder {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Build a tree for every unit in the mapping. Units are independent;
    /// an empty path set yields an empty tree.
    pub fn build_all(
        &self,
        sections: &BTreeMap<String, Vec<String>>,
    ) -> BTreeMap<String, TemplateTree> {
        sections
            .iter()
            .map(|(unit, paths)| (unit.clone(), self.build_one(paths)))
            .collect()
    }

    /// Build a single unit's tree from its raw path set.
    ///
    /// A path without the delimiter stays a leaf at the root. A path with
    /// delimiters is nested under one node per directory segment, and the
    /// full original path string is stored as the leaf so the consumer can
    /// resolve the actual file. Leaves landing on the same node keep their
    /// relative input order. Empty segments are dropped.
    pub fn build_one(&self, paths: &[String]) -> TemplateTree {
        let mut tree = TemplateTree::default();

        for path in paths {
            if !path.contains(self.delimiter) {
                tree.leaves.push(path.clone());
                continue;
            }
            let segments: Vec<&str> = path
                .split(self.delimiter)
                .filter(|s| !s.is_empty())
                .collect();
            if segments.is_empty() {
                // Nothing but delimiters; keep it as a root leaf so no
                // input path ever disappears from the tree.
                tree.leaves.push(path.clone());
                continue;
            }
            branch(&mut tree, &segments, path);
        }

        tree
    }
}

/// Descend the segment chain, creating nodes as needed, and append the
/// original path as a leaf at the final segment's parent node.
fn branch(node: &mut TemplateTree, segments: &[&str], original: &str) {
    match segments {
        [] => {}
        [_file] => node.leaves.push(original.to_string()),
        [head, rest @ ..] => {
            let child = node.children.entry((*head).to_string()).or_default();
            branch(child, rest, original);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_top_level_paths_pass_through() {
        let tree = TreeBuilder::default().build_one(&paths(&["index", "error"]));
        assert_eq!(tree.leaves(), &["index", "error"]);
        assert_eq!(tree.children().count(), 0);
    }

    #[test]
    fn test_nested_paths_build_branches() {
        let tree = TreeBuilder::default().build_one(&paths(&[
            "index",
            "admin/users",
            "admin/roles/list",
        ]));

        assert_eq!(tree.leaves(), &["index"]);

        let admin = tree.child("admin").unwrap();
        assert_eq!(admin.leaves(), &["admin/users"]);

        let roles = admin.child("roles").unwrap();
        assert_eq!(roles.leaves(), &["admin/roles/list"]);
        assert_eq!(roles.children().count(), 0);
    }

    #[test]
    fn test_deep_single_path() {
        let tree = TreeBuilder::default().build_one(&paths(&["a/b/c/d"]));
        let c = tree.descend(&["a", "b", "c"]).unwrap();
        assert_eq!(c.leaves(), &["a/b/c/d"]);
        // No node for the file segment itself
        assert!(c.child("d").is_none());
    }

    #[test]
    fn test_empty_path_set() {
        let tree = TreeBuilder::default().build_one(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_leaf_count_matches_input_size() {
        let input = paths(&[
            "index",
            "admin/users",
            "admin/roles/list",
            "admin/roles/edit",
            "blog/posts/show",
        ]);
        let tree = TreeBuilder::default().build_one(&input);
        assert_eq!(tree.leaf_count(), input.len());
    }

    #[test]
    fn test_shared_prefix_shares_ancestors() {
        let tree = TreeBuilder::default()
            .build_one(&paths(&["admin/users/index", "admin/users/edit"]));
        let users = tree.descend(&["admin", "users"]).unwrap();
        assert_eq!(users.leaves(), &["admin/users/index", "admin/users/edit"]);
        assert_eq!(tree.children().count(), 1);
        assert_eq!(tree.child("admin").unwrap().children().count(), 1);
    }

    #[test]
    fn test_leaf_order_preserved_per_node() {
        let tree = TreeBuilder::default()
            .build_one(&paths(&["dir/z", "top_b", "dir/a", "top_a"]));
        assert_eq!(tree.leaves(), &["top_b", "top_a"]);
        assert_eq!(tree.child("dir").unwrap().leaves(), &["dir/z", "dir/a"]);
    }

    #[test]
    fn test_leaf_and_node_coexist_under_same_name() {
        let tree =
            TreeBuilder::default().build_one(&paths(&["admin", "admin/users"]));
        assert_eq!(tree.leaves(), &["admin"]);
        assert_eq!(tree.child("admin").unwrap().leaves(), &["admin/users"]);
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_duplicate_paths_both_kept() {
        let tree = TreeBuilder::default().build_one(&paths(&["a/b", "a/b"]));
        assert_eq!(tree.child("a").unwrap().leaves(), &["a/b", "a/b"]);
    }

    #[test]
    fn test_empty_segments_dropped() {
        let tree = TreeBuilder::default().build_one(&paths(&["a//b", "c/"]));
        assert_eq!(tree.child("a").unwrap().leaves(), &["a//b"]);
        // "c/" has a single effective segment, so it stays at the root
        assert_eq!(tree.leaves(), &["c/"]);
    }

    #[test]
    fn test_delimiter_only_paths_stay_at_root() {
        let tree = TreeBuilder::default().build_one(&paths(&["/", "//", "a/b"]));
        assert_eq!(tree.leaves(), &["/", "//"]);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_custom_delimiter() {
        let tree = TreeBuilder::new('\\').build_one(&paths(&["a\\b", "a/b"]));
        assert_eq!(tree.child("a").unwrap().leaves(), &["a\\b"]);
        // '/' is an ordinary character for this builder
        assert_eq!(tree.leaves(), &["a/b"]);
    }

    #[test]
    fn test_build_all_handles_units_independently() {
        let mut sections = BTreeMap::new();
        sections.insert("app".to_string(), paths(&["x"]));
        sections.insert("blog".to_string(), paths(&["posts/index"]));
        sections.insert("empty".to_string(), vec![]);

        let trees = TreeBuilder::default().build_all(&sections);
        assert_eq!(trees.len(), 3);
        assert_eq!(trees["app"].leaves(), &["x"]);
        assert_eq!(trees["blog"].child("posts").unwrap().leaves(), &["posts/index"]);
        assert!(trees["empty"].is_empty());
    }

    #[test]
    fn test_build_all_empty_mapping() {
        let trees = TreeBuilder::default().build_all(&BTreeMap::new());
        assert!(trees.is_empty());
    }

    #[test]
    fn test_build_one_equals_build_all_singleton() {
        let input = paths(&["index", "admin/users", "admin/roles/list"]);
        let builder = TreeBuilder::default();

        let mut sections = BTreeMap::new();
        sections.insert("blog".to_string(), input.clone());

        assert_eq!(builder.build_one(&input), builder.build_all(&sections)["blog"]);
    }

    #[test]
    fn test_resolve_dotted_reference() {
        let tree = TreeBuilder::default().build_one(&paths(&[
            "index.twig",
            "admin/users/index.twig",
            "admin/users/edit.twig",
        ]));

        assert_eq!(
            tree.resolve("admin.users.edit", '/'),
            Some("admin/users/edit.twig")
        );
        assert_eq!(
            tree.resolve("admin/users/index", '/'),
            Some("admin/users/index.twig")
        );
        assert_eq!(tree.resolve("index", '/'), Some("index.twig"));
        assert_eq!(tree.resolve("admin.users.missing", '/'), None);
        assert_eq!(tree.resolve("nope.index", '/'), None);
    }

    #[test]
    fn test_resolve_with_custom_delimiter() {
        let tree = TreeBuilder::new('\\')
            .build_one(&paths(&["admin\\users\\index.twig", "error.twig"]));

        assert_eq!(tree.descend(&["admin", "users"]).unwrap().leaf_count(), 1);
        assert_eq!(
            tree.resolve("admin.users.index", '\\'),
            Some("admin\\users\\index.twig")
        );
        assert_eq!(
            tree.resolve("admin\\users\\index", '\\'),
            Some("admin\\users\\index.twig")
        );
        assert_eq!(tree.resolve("error", '\\'), Some("error.twig"));
        assert_eq!(tree.resolve("admin.users.missing", '\\'), None);
    }

    #[test]
    fn test_render_indents_by_depth() {
        let tree = TreeBuilder::default()
            .build_one(&paths(&["index", "admin/users"]));
        let out = tree.render();
        assert_eq!(out, "- index\n- admin/\n  - admin/users\n");
    }
}
