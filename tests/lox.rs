//! End-to-end scenarios through the tree-walk pipeline: full source in,
//! exact stdout out.

use duolox::{Backend, Lox, LoxError};

fn run(source: &str) -> String {
	let mut output = Vec::new();
	let mut lox = Lox::new(Backend::Treewalk, false, &mut output);
	lox.run(source).unwrap();
	drop(lox);
	String::from_utf8(output).expect("output is valid UTF-8")
}

fn run_err(source: &str) -> LoxError {
	let mut output = Vec::new();
	let mut lox = Lox::new(Backend::Treewalk, false, &mut output);
	lox.run(source).expect_err("expected the pipeline to fail")
}

#[test]
fn arithmetic_precedence() {
	assert_eq!(run("print 1 + 2 * 3;"), "7\n");
}

#[test]
fn variables_add_up() {
	assert_eq!(run("var a = 1; var b = 2; print a + b;"), "3\n");
}

#[test]
fn recursive_fibonacci() {
	let source = "fun fib(n){ if(n<2) return n; return fib(n-1)+fib(n-2);} print fib(10);";
	assert_eq!(run(source), "55\n");
}

#[test]
fn while_loop_counts() {
	assert_eq!(run("var i=0; while(i<3){print i; i=i+1;}"), "0\n1\n2\n");
}

#[test]
fn closures_keep_private_state() {
	let source = "fun mk(){var x=0; fun inc(){x=x+1; return x;} return inc;} \
	              var f=mk(); print f(); print f();";
	assert_eq!(run(source), "1\n2\n");
}

#[test]
fn inherited_method_is_callable_on_the_subclass() {
	assert_eq!(run(r#"class A{greet(){print "hi";}} class B < A{} B().greet();"#), "hi\n");
}

#[test]
fn for_loop_matches_its_while_desugaring() {
	let for_loop = run("for(var i = 0; i < 4; i = i + 1) print i;");
	let while_loop = run("{ var i = 0; while(i < 4) { print i; i = i + 1; } }");
	assert_eq!(for_loop, while_loop);
}

#[test]
fn short_circuit_controls_evaluation() {
	let source = r#"
		fun called() { print "evaluated"; return true; }
		print true or called();
		print false and called();
		print false or called();
	"#;
	assert_eq!(run(source), "true\nfalse\nevaluated\ntrue\n");
}

#[test]
fn super_dispatches_to_the_parent() {
	let source = r#"
		class Doughnut {
			cook() { print "Fry until golden brown."; }
		}
		class BostonCream < Doughnut {
			cook() {
				super.cook();
				print "Pipe full of custard.";
			}
		}
		BostonCream().cook();
	"#;
	assert_eq!(run(source), "Fry until golden brown.\nPipe full of custard.\n");
}

#[test]
fn this_survives_method_extraction() {
	let source = r#"
		class Greeter {
			init(name) { this.name = name; }
			greet() { print this.name; }
		}
		var g = Greeter("world");
		var method = g.greet;
		g = nil;
		method();
	"#;
	assert_eq!(run(source), "world\n");
}

#[test]
fn initializers_run_on_construction() {
	let source = r#"
		class Point {
			init(x, y) { this.x = x; this.y = y; }
		}
		var p = Point(3, 4);
		print p.x + p.y;
	"#;
	assert_eq!(run(source), "7\n");
}

#[test]
fn strings_concatenate_and_compare() {
	assert_eq!(run(r#"print "foo" + "bar"; print "a" == "a"; print "a" == "b";"#), "foobar\ntrue\nfalse\n");
}

#[test]
fn lex_errors_exit_65() {
	assert_eq!(run_err("var x = @;").exit_code(), 65);
}

#[test]
fn parse_errors_exit_65() {
	assert_eq!(run_err("print 1").exit_code(), 65);
}

#[test]
fn resolve_errors_exit_65() {
	assert_eq!(run_err("return 1;").exit_code(), 65);
}

#[test]
fn runtime_errors_exit_70() {
	assert_eq!(run_err("print missing;").exit_code(), 70);
	assert_eq!(run_err("print 1 / 0;").exit_code(), 70);
}
