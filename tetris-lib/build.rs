use std::path::Path;
use std::{env, fs};

#[path = "src/shape.rs"]
mod shape;

use shape::Shape;

// One block per kind in catalog order (I J L O S T Z), four rotations side by side.
const CATALOG_TXT: &str = r"
....|.#..|....|.#..
####|.#..|####|.#..
....|.#..|....|.#..
....|.#..|....|.#..

#...|.##.|....|.#..
###.|.#..|###.|.#..
....|.#..|..#.|##..
....|....|....|....

..#.|.#..|....|##..
###.|.#..|###.|.#..
....|.##.|#...|.#..
....|....|....|....

....|....|....|....
.##.|.##.|.##.|.##.
.##.|.##.|.##.|.##.
....|....|....|....

....|.#..|....|.#..
.##.|.##.|.##.|.##.
##..|..#.|##..|..#.
....|....|....|....

.#..|.#..|....|.#..
###.|.##.|###.|##..
....|.#..|.#..|.#..
....|....|....|....

....|..#.|....|..#.
##..|.##.|##..|.##.
.##.|.#..|.##.|.#..
....|....|....|....
";

const KINDS: usize = 7;
const ROTATIONS: usize = 4;

struct CatalogExt {
    kinds: Vec<[Shape; ROTATIONS]>,
}

impl quote::ToTokens for CatalogExt {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        let kinds: Vec<_> = self
            .kinds
            .iter()
            .map(|rotations| {
                let shapes = rotations.iter().map(|s| {
                    let bits = s.bits;
                    quote::quote! { Shape { bits: #bits } }
                });
                quote::quote! { [ #(#shapes),* ] }
            })
            .collect();

        tokens.extend(quote::quote! { #(#kinds),* });
    }
}

fn split_rotations(block: &str) -> [Shape; ROTATIONS] {
    let mut rotations: Vec<String> = vec![String::new(); ROTATIONS];
    for line in block.lines() {
        for (idx, part) in line.split('|').enumerate() {
            assert!(idx < ROTATIONS, "too many rotations in line {line:?}");
            rotations[idx].push_str(part);
            rotations[idx].push('\n');
        }
    }
    let shapes: Vec<Shape> = rotations.iter().map(|s| Shape::from_str(s)).collect();
    for shape in &shapes {
        assert_eq!(shape.len(), 4, "every rotation must fill four cells:\n{block}");
    }
    [shapes[0], shapes[1], shapes[2], shapes[3]]
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("catalog.rs");

    let kinds: Vec<_> = CATALOG_TXT
        .trim()
        .split("\n\n")
        .map(split_rotations)
        .collect();
    assert_eq!(kinds.len(), KINDS);

    let catalog = CatalogExt { kinds };
    let code = quote::quote! {
        const SHAPES: [[Shape; ROTATIONS]; KIND_COUNT] = [ #catalog ];
    }
    .to_string();

    let file = syn::parse_file(&code).expect("generated catalog parses");
    fs::write(&dest_path, prettyplease::unparse(&file)).expect("catalog written");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/shape.rs");
}
