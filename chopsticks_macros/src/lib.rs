use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{self, ImplItemFn};

/// This macro is added before a method of `GameEngine` in the impl block.
/// Use this macro to first check if the current game phase is exactly the
/// phase in the attribute.
///
/// For example, `#[allowed_phase(InPlay)]` will make a method first check
/// if the current game phase is `InPlay`. If not, the method returns
/// `Err(InvalidMove::WrongPhase { .. })` naming the method and the phase the
/// engine was in. `GamePhase` and `InvalidMove` must be in scope.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let mut ast: ImplItemFn = match syn::parse(item) {
        Ok(ast) => ast,
        Err(err) => return err.to_compile_error().into(),
    };
    let phase: syn::Ident = match syn::parse(attr) {
        Ok(phase) => phase,
        Err(err) => return err.to_compile_error().into(),
    };
    let early_return: syn::Stmt = match syn::parse2(phase_guard(&ast, &phase)) {
        Ok(stmt) => stmt,
        Err(err) => return err.to_compile_error().into(),
    };
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}

fn phase_guard(ast: &ImplItemFn, phase: &syn::Ident) -> TokenStream2 {
    let function_name = ast.sig.ident.to_string();
    quote! {
        if self.current_game_phase != GamePhase::#phase {
            return Err(InvalidMove::WrongPhase {
                operation: #function_name,
                phase: self.current_game_phase,
            });
        }
    }
}
