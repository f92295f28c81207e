//! Common source code fixtures for tests.

pub const EMPTY: &str = "";

pub const IMPORTS: &str = r#"
import crafttweaker.item.IItemStack;
import mods.jei.JEI as J;
"#;

pub const RECIPES: &str = r#"
#priority 10
import crafttweaker.item.IItemStack;

val stone = <minecraft:stone>;
var count as int = 0;

// remove and re-add
recipes.remove(<minecraft:furnace>);
recipes.addShaped("furnace", <minecraft:furnace>, [
    [stone, stone, stone],
    [stone, null, stone],
    [stone, stone, stone],
]);

for i in 0 .. 10 {
    count += i;
}
"#;

pub const FUNCTIONS: &str = r#"
function add(a as int, b as int) as int {
    return a + b;
}

function greet(name as string) {
    if (name == "") {
        print("nobody");
    } else {
        print("hello " ~ name);
    }
}

static function helper() as void;
"#;

pub const CLASS: &str = r#"
zenClass Counter {
    var value as int = 0;
    static INSTANCES as Counter[] = [];

    zenConstructor(start as int) {
        this.value = start;
    }

    function increment() as int {
        value += 1;
        return value;
    }

    operator [](index as int) as int {
        return value;
    }
}
"#;

/// Several independent top-level items, handy for top-level reuse.
pub const MANY_ITEMS: &str = "a = 1;\nb = 2;\nc = 3;\nd = 4;\ne = 5;\nf = 6;\n";

/// A function body large enough that a block reparse is clearly cheaper.
pub const BLOCK_BODY: &str = r#"function f() {
    x = 1;
    y = 2;
}
g();
"#;

pub const BROKEN: &str = r#"
val x = ;
function f( { return 1 }
zenClass { var y }
"#;

/// Every valid fixture.
pub const VALID: &[&str] = &[EMPTY, IMPORTS, RECIPES, FUNCTIONS, CLASS, MANY_ITEMS, BLOCK_BODY];
